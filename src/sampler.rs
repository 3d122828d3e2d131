//! Reduce a pixel buffer to a bounded working set for clustering.

use rand::Rng;
use rgb::{RGB8, RGBA8};

/// Default cap on the number of pixels fed to k-means.
pub const DEFAULT_MAX_SAMPLES: usize = 6000;

/// Drop fully transparent pixels, then subsample with replacement if more
/// than `max_samples` remain. Below the cap the opaque pixels come back in
/// buffer order.
pub fn sample_pixels<R: Rng + ?Sized>(
    pixels: &[RGBA8],
    max_samples: usize,
    rng: &mut R,
) -> Vec<RGB8> {
    let visible: Vec<RGB8> = pixels
        .iter()
        .filter(|p| p.a != 0)
        .map(|p| p.rgb())
        .collect();

    if visible.len() <= max_samples {
        log::debug!("using all {} visible pixels", visible.len());
        return visible;
    }

    log::debug!(
        "drawing {} samples from {} visible pixels",
        max_samples,
        visible.len()
    );
    (0..max_samples)
        .map(|_| visible[rng.gen_range(0..visible.len())])
        .collect()
}
