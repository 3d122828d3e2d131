//! Curated palette catalog: JSON records plus their precomputed Lab colors.

use crate::color::{Lab, hex_to_rgb, rgb_to_lab};
use crate::error::{PaletteError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One palette as supplied by the catalog source.
///
/// Accepts both `{"name", "colors"}` records and the scraped dataset form
/// `{"id", "colors", "likes", "date"}`. A record may give its colors as a
/// concatenated hex `code` instead of a `colors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPalette {
    #[serde(alias = "id")]
    pub name: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl CatalogPalette {
    pub fn new(name: impl Into<String>, colors: &[&str]) -> Self {
        CatalogPalette {
            name: name.into(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
            code: None,
            likes: None,
            date: None,
        }
    }

    /// Fill `colors` from `code` when the record carried no color list.
    fn resolve_colors(mut self) -> Self {
        if self.colors.is_empty() {
            if let Some(code) = &self.code {
                self.colors = decode_palette_code(code);
            }
        }
        self
    }
}

/// A catalog palette with its colors already converted to Lab.
#[derive(Debug, Clone)]
pub struct PreparedPalette {
    pub palette: CatalogPalette,
    pub lab: Vec<Lab>,
}

/// Immutable catalog, converted once and shared across runs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<PreparedPalette>,
}

impl Catalog {
    /// Convert every palette's hex colors to Lab. Order is preserved.
    pub fn from_palettes(palettes: Vec<CatalogPalette>) -> Self {
        let entries: Vec<PreparedPalette> = palettes
            .into_par_iter()
            .map(|palette| {
                let palette = palette.resolve_colors();
                let lab = palette
                    .colors
                    .iter()
                    .map(|hex| rgb_to_lab(hex_to_rgb(hex)))
                    .collect();
                PreparedPalette { palette, lab }
            })
            .collect();

        for entry in entries.iter().filter(|e| e.lab.is_empty()) {
            log::warn!("palette {:?} has no colors and will never be ranked", entry.palette.name);
        }

        Catalog { entries }
    }

    /// Parse a JSON array of palette records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let palettes: Vec<CatalogPalette> = serde_json::from_str(json)?;
        Ok(Self::from_palettes(palettes))
    }

    pub fn entries(&self) -> &[PreparedPalette] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read and prepare a catalog file. Any failure is reported as
/// [`PaletteError::CatalogLoad`] naming the path.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let wrap = |source: PaletteError| PaletteError::CatalogLoad {
        path: path.to_path_buf(),
        source: Box::new(source),
    };
    let json = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
    let catalog = Catalog::from_json_str(&json).map_err(wrap)?;
    log::info!("loaded {} palettes from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Split a concatenated hex code (`"ffaa00112233..."`) into `#`-prefixed
/// colors. Codes that are empty or not a multiple of six digits decode to
/// nothing.
pub fn decode_palette_code(code: &str) -> Vec<String> {
    if code.is_empty() || code.len() % 6 != 0 || !code.is_ascii() {
        return Vec::new();
    }
    code.as_bytes()
        .chunks(6)
        .map(|chunk| format!("#{}", String::from_utf8_lossy(chunk)))
        .collect()
}
