//! Dominant color extraction by bounded-iteration k-means in RGB space.
//!
//! Centroids start at distinct randomly chosen samples, then alternate
//! between an assignment pass (nearest centroid by squared RGB distance,
//! lowest index wins ties) and an update pass (mean of assigned samples;
//! a centroid that attracts nothing stays where it is). Iteration stops
//! early once a full assignment pass changes nothing.

use rand::Rng;
use rgb::RGB8;
use std::collections::HashSet;

/// Number of dominant colors extracted per image.
pub const DEFAULT_NUM_COLORS: usize = 5;
/// Upper bound on assignment/update rounds.
pub const DEFAULT_MAX_ITERATIONS: usize = 12;

/// Running cluster center with fractional channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Centroid {
    /// Round each channel to the nearest integer.
    pub fn finalize(&self) -> RGB8 {
        RGB8::new(round_channel(self.r), round_channel(self.g), round_channel(self.b))
    }
}

impl From<RGB8> for Centroid {
    fn from(p: RGB8) -> Self {
        Centroid {
            r: p.r as f64,
            g: p.g as f64,
            b: p.b as f64,
        }
    }
}

#[inline]
fn round_channel(v: f64) -> u8 {
    // Means of 0..=255 values stay in range; the clamp only absorbs float noise.
    v.round().clamp(0.0, 255.0) as u8
}

/// Squared Euclidean distance over raw RGB channels.
#[inline]
pub fn squared_distance(p: &RGB8, c: &Centroid) -> f64 {
    let dr = p.r as f64 - c.r;
    let dg = p.g as f64 - c.g;
    let db = p.b as f64 - c.b;
    dr * dr + dg * dg + db * db
}

/// Per-centroid channel sums for one update pass.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    r: u64,
    g: u64,
    b: u64,
    count: u64,
}

/// Choose up to `k` centroids from distinct random sample positions.
fn pick_initial_centroids<R: Rng + ?Sized>(samples: &[RGB8], k: usize, rng: &mut R) -> Vec<Centroid> {
    let mut centroids = Vec::with_capacity(k);
    let mut used = HashSet::with_capacity(k);
    while centroids.len() < k && used.len() < samples.len() {
        let index = rng.gen_range(0..samples.len());
        if !used.insert(index) {
            continue;
        }
        centroids.push(Centroid::from(samples[index]));
    }
    centroids
}

/// Index of the nearest centroid; ties go to the lowest index.
#[inline]
fn nearest_centroid(pixel: &RGB8, centroids: &[Centroid]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = squared_distance(pixel, &centroids[0]);
    for (j, c) in centroids.iter().enumerate().skip(1) {
        let d = squared_distance(pixel, c);
        if d < best_dist {
            best_dist = d;
            best_idx = j;
        }
    }
    best_idx
}

/// Assign every sample to its nearest centroid. Returns whether any
/// assignment changed.
pub fn assign_clusters(samples: &[RGB8], centroids: &[Centroid], assignments: &mut [usize]) -> bool {
    if centroids.is_empty() {
        return false;
    }
    let mut changed = false;
    for (pixel, slot) in samples.iter().zip(assignments.iter_mut()) {
        let best = nearest_centroid(pixel, centroids);
        if *slot != best {
            *slot = best;
            changed = true;
        }
    }
    changed
}

/// Move each centroid to the mean of its assigned samples. Empty clusters
/// keep their previous position.
pub fn update_centroids(samples: &[RGB8], assignments: &[usize], centroids: &mut [Centroid]) {
    let mut sums = vec![Accumulator::default(); centroids.len()];
    for (pixel, &idx) in samples.iter().zip(assignments) {
        let acc = &mut sums[idx];
        acc.r += pixel.r as u64;
        acc.g += pixel.g as u64;
        acc.b += pixel.b as u64;
        acc.count += 1;
    }

    for (c, acc) in centroids.iter_mut().zip(&sums) {
        if acc.count == 0 {
            continue;
        }
        let n = acc.count as f64;
        *c = Centroid {
            r: acc.r as f64 / n,
            g: acc.g as f64 / n,
            b: acc.b as f64 / n,
        };
    }
}

/// Total squared distance from each sample to its assigned centroid.
pub fn within_cluster_sse(samples: &[RGB8], centroids: &[Centroid], assignments: &[usize]) -> f64 {
    samples
        .iter()
        .zip(assignments)
        .map(|(p, &idx)| squared_distance(p, &centroids[idx]))
        .sum()
}

/// Cluster `samples` into at most `k` representative colors.
///
/// With `k` or fewer samples the input is returned unchanged. Otherwise the
/// result has exactly `k` entries, which may repeat when the image holds
/// fewer than `k` distinct colors.
pub fn kmeans<R: Rng + ?Sized>(
    samples: &[RGB8],
    k: usize,
    max_iterations: usize,
    rng: &mut R,
) -> Vec<RGB8> {
    if samples.is_empty() || k == 0 {
        return Vec::new();
    }
    if samples.len() <= k {
        return samples.to_vec();
    }

    let mut centroids = pick_initial_centroids(samples, k, rng);
    if centroids.is_empty() {
        centroids.push(Centroid::from(samples[0]));
    }
    while centroids.len() < k {
        let fallback = samples[rng.gen_range(0..samples.len())];
        centroids.push(Centroid::from(fallback));
    }

    let mut assignments = vec![0usize; samples.len()];
    let mut rounds = 0;
    for _ in 0..max_iterations {
        rounds += 1;
        let changed = assign_clusters(samples, &centroids, &mut assignments);
        update_centroids(samples, &assignments, &mut centroids);
        if !changed {
            break;
        }
    }
    log::debug!(
        "k-means over {} samples finished after {} of {} rounds",
        samples.len(),
        rounds,
        max_iterations
    );

    centroids.iter().take(k).map(Centroid::finalize).collect()
}
