mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use palette_match::{analyze_file, generate_swatch_svg, load_catalog};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let options = cli.options();

    // A catalog that fails to load ends the session before any image is read.
    let catalog = load_catalog(&cli.catalog)?;

    let result = analyze_file(&cli.input, &catalog, &options)
        .with_context(|| format!("Failed to analyze {}", cli.input.display()))?;

    if cli.json {
        println!("{}", result.to_json()?);
    } else {
        print!("{}", result.to_text());
    }

    if let Some(svg_path) = &cli.svg {
        generate_swatch_svg(&result, svg_path)
            .with_context(|| format!("Failed to write {}", svg_path.display()))?;
        if !cli.json {
            println!("Swatches written to {}", svg_path.display());
        }
    }

    Ok(())
}
