use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "palette-match")]
#[command(about = "Extract dominant colors from an image and find similar palettes")]
#[command(version)]
pub struct Cli {
    /// Input image file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Palette catalog (JSON array of {name|id, colors})
    #[arg(short = 'p', long, default_value = "palettes.json")]
    pub catalog: PathBuf,

    /// Number of dominant colors to extract (default: 5)
    #[arg(short, long, default_value = "5")]
    pub colors: usize,

    /// Number of similar palettes to show (default: 8)
    #[arg(short, long, default_value = "8")]
    pub top: usize,

    /// Maximum number of pixels sampled for clustering (default: 6000)
    #[arg(long, default_value = "6000")]
    pub samples: usize,

    /// k-means iteration cap (default: 12)
    #[arg(long, default_value = "12")]
    pub iterations: usize,

    /// Downscale so the longest side is at most this many pixels (default: 420)
    #[arg(long, default_value = "420")]
    pub max_dimension: u32,

    /// Random seed for reproducible results
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the result as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Also write an SVG swatch sheet to this path
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

impl Cli {
    pub fn options(&self) -> palette_match::AnalysisOptions {
        palette_match::AnalysisOptions {
            num_colors: self.colors,
            max_samples: self.samples,
            max_iterations: self.iterations,
            top_n: self.top,
            max_dimension: self.max_dimension,
            seed: self.seed,
        }
    }
}
