//! palette-match - find curated palettes that look like an image
//!
//! This library extracts a handful of dominant colors from a raster image and
//! ranks a catalog of named palettes by how close they sit to those colors in
//! CIE L*a*b* space.
//!
//! ## Pipeline
//!
//! - **Sampling**: transparent pixels are dropped and large images are
//!   subsampled (with replacement) to a fixed cap
//! - **Quantization**: bounded-iteration k-means in RGB space
//! - **Conversion**: sRGB → Lab under the D65 white point
//! - **Matching**: mean nearest-color Lab distance from each palette to the
//!   image colors, sorted ascending
//!
//! ## Example
//!
//! ```rust,no_run
//! use palette_match::{analyze_file, load_catalog, AnalysisOptions};
//! use std::path::Path;
//!
//! let catalog = load_catalog(Path::new("palettes.json")).expect("catalog");
//! let options = AnalysisOptions {
//!     num_colors: 6,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let result = analyze_file(Path::new("photo.png"), &catalog, &options)
//!     .expect("analysis failed");
//! println!("{}", result.to_text());
//! ```

pub mod catalog;
pub mod color;
pub mod error;
pub mod image_processor;
pub mod matcher;
pub mod quantizer;
pub mod report;
pub mod sampler;

pub use catalog::{Catalog, CatalogPalette, decode_palette_code, load_catalog};
pub use color::{Lab, hex_to_rgb, lab_distance, rgb_to_hex, rgb_to_lab};
pub use error::{PaletteError, Result};
pub use image_processor::{ImageData, load_image};
pub use matcher::{ScoredPalette, palette_distance, rank};
pub use quantizer::kmeans;
pub use report::{DominantColor, RunResult, generate_swatch_svg};
pub use sampler::sample_pixels;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Options for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Number of dominant colors to extract (default: 5)
    pub num_colors: usize,
    /// Cap on pixels fed to clustering (default: 6000)
    pub max_samples: usize,
    /// k-means iteration cap (default: 12)
    pub max_iterations: usize,
    /// Number of ranked palettes to return (default: 8)
    pub top_n: usize,
    /// Longest image side after downscaling, in pixels (default: 420)
    pub max_dimension: u32,
    /// Fixed random seed; `None` draws from OS entropy (default: None)
    pub seed: Option<u64>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            num_colors: quantizer::DEFAULT_NUM_COLORS,
            max_samples: sampler::DEFAULT_MAX_SAMPLES,
            max_iterations: quantizer::DEFAULT_MAX_ITERATIONS,
            top_n: matcher::DEFAULT_TOP_N,
            max_dimension: image_processor::DEFAULT_MAX_DIMENSION,
            seed: None,
        }
    }
}

impl AnalysisOptions {
    pub fn validate(&self) -> Result<()> {
        if self.num_colors == 0 {
            return Err(PaletteError::InvalidOption("num_colors must be greater than 0".into()));
        }
        if self.max_samples == 0 {
            return Err(PaletteError::InvalidOption("max_samples must be greater than 0".into()));
        }
        if self.max_dimension == 0 {
            return Err(PaletteError::InvalidOption("max_dimension must be greater than 0".into()));
        }
        Ok(())
    }

    /// Generator for a run: seeded when `seed` is set, otherwise from entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Run the full pipeline on an already decoded (and already scaled) image.
///
/// Never fails: an image with no visible pixels yields no dominant colors
/// and no palettes.
pub fn process_image<R: Rng + ?Sized>(
    image_data: &ImageData,
    catalog: &Catalog,
    options: &AnalysisOptions,
    rng: &mut R,
) -> RunResult {
    let samples = sample_pixels(&image_data.pixels, options.max_samples, rng);
    if samples.is_empty() {
        log::warn!(
            "{}x{} image has no visible pixels",
            image_data.width,
            image_data.height
        );
    }

    let centroids = kmeans(&samples, options.num_colors, options.max_iterations, rng);
    let dominant_colors: Vec<DominantColor> =
        centroids.into_iter().map(DominantColor::new).collect();

    let image_lab: Vec<Lab> = dominant_colors.iter().map(|c| c.lab).collect();
    let palettes = rank(&image_lab, catalog, options.top_n);

    RunResult {
        dominant_colors,
        palettes,
    }
}

/// Load an image file, scale it, and match it against `catalog`.
pub fn analyze_file(
    input_path: &std::path::Path,
    catalog: &Catalog,
    options: &AnalysisOptions,
) -> Result<RunResult> {
    options.validate()?;
    let image_data = load_image(input_path, options.max_dimension)?;
    let mut rng = options.rng();
    Ok(process_image(&image_data, catalog, options, &mut rng))
}
