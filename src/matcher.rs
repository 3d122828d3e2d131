//! Rank catalog palettes against an image's dominant colors.

use crate::catalog::{Catalog, CatalogPalette};
use crate::color::{Lab, lab_distance};
use serde::Serialize;

/// Number of ranked palettes returned by default.
pub const DEFAULT_TOP_N: usize = 8;

/// A catalog palette and its distance to the image colors (lower is closer).
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPalette {
    pub palette: CatalogPalette,
    pub distance: f64,
}

/// Mean, over palette colors, of the Lab distance to the nearest image color.
///
/// The palette drives the outer loop, so the measure is one-directional: a
/// palette whose colors all sit near a single image color scores well even
/// if the other image colors go unmatched. An empty `palette` yields NaN and
/// an empty `image` yields infinity; callers filter those out.
pub fn palette_distance(image: &[Lab], palette: &[Lab]) -> f64 {
    let total: f64 = palette
        .iter()
        .map(|target| {
            image
                .iter()
                .map(|source| lab_distance(target, source))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    total / palette.len() as f64
}

/// Score every non-empty catalog palette, sort ascending (stable, so ties
/// keep catalog order) and keep the best `top_n`.
pub fn rank(image: &[Lab], catalog: &Catalog, top_n: usize) -> Vec<ScoredPalette> {
    if image.is_empty() {
        log::warn!("no dominant colors to match against");
        return Vec::new();
    }

    let mut scored: Vec<ScoredPalette> = catalog
        .entries()
        .iter()
        .filter(|entry| !entry.lab.is_empty())
        .map(|entry| ScoredPalette {
            palette: entry.palette.clone(),
            distance: palette_distance(image, &entry.lab),
        })
        .collect();

    scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    scored.truncate(top_n);
    scored
}
