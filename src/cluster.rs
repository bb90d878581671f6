//! Nearest-centroid assignment and the refine-until-stable loop.

use log::{debug, trace};

use crate::pixel::{distance, Centroid, Pixel};

/// Pixels farther than this from every centroid sit out the round.
pub const ASSIGN_CUTOFF: f64 = 30.0;
/// Total centroid movement below which the loop is considered settled.
pub const CONVERGENCE_THRESHOLD: f64 = 0.001;
pub const MAX_ITERATIONS: usize = 100;

/// Index of the nearest centroid within [`ASSIGN_CUTOFF`], lowest index on ties.
pub fn nearest_centroid(pixel: Pixel, centroids: &[Centroid]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &centroid) in centroids.iter().enumerate() {
        let d = distance(pixel, centroid);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((idx, d));
        }
    }
    best.filter(|&(_, d)| d < ASSIGN_CUTOFF).map(|(idx, _)| idx)
}

/// Build fresh clusters, index-aligned with `centroids`.
pub fn assign(pixels: &[Pixel], centroids: &[Centroid]) -> Vec<Vec<Pixel>> {
    let mut clusters: Vec<Vec<Pixel>> = vec![Vec::new(); centroids.len()];
    for &pixel in pixels {
        if let Some(idx) = nearest_centroid(pixel, centroids) {
            clusters[idx].push(pixel);
        }
    }
    clusters
}

/// Componentwise mean of `members`, clamped to `0..=255`. `None` when empty.
pub fn mean(members: &[Pixel]) -> Option<Centroid> {
    if members.is_empty() {
        return None;
    }
    let mut sum = [0.0f64; 4];
    for p in members {
        sum[0] += p.red as f64;
        sum[1] += p.green as f64;
        sum[2] += p.blue as f64;
        sum[3] += p.alpha as f64;
    }
    let n = members.len() as f64;
    let m = sum.map(|s| (s / n).clamp(0.0, 255.0));
    Some(Centroid::new(m[0], m[1], m[2], m[3]))
}

/// New centroid per cluster; an empty cluster keeps its previous centroid.
pub fn refine(clusters: &[Vec<Pixel>], previous: &[Centroid]) -> Vec<Centroid> {
    clusters
        .iter()
        .zip(previous)
        .map(|(members, &old)| mean(members).unwrap_or(old))
        .collect()
}

/// Sum of the distances each centroid moved between two rounds.
pub fn total_movement(old: &[Centroid], new: &[Centroid]) -> f64 {
    old.iter().zip(new).map(|(&a, &b)| distance(a, b)).sum()
}

/// Outcome of clustering a working set from a given set of seeds.
#[derive(Clone, Debug)]
pub struct ClusterRun {
    pub centroids: Vec<Centroid>,
    pub clusters: Vec<Vec<Pixel>>,
    pub iterations: usize,
    pub converged: bool,
}

/// Assign, then alternate refine/assign until the total centroid movement
/// drops below [`CONVERGENCE_THRESHOLD`] or [`MAX_ITERATIONS`] rounds ran.
/// Hitting the cap is not an error; the last centroids stand.
pub fn run(pixels: &[Pixel], seeds: Vec<Centroid>) -> ClusterRun {
    run_with_cap(pixels, seeds, MAX_ITERATIONS)
}

/// [`run`] with an explicit round limit in place of [`MAX_ITERATIONS`].
pub fn run_with_cap(pixels: &[Pixel], seeds: Vec<Centroid>, max_iterations: usize) -> ClusterRun {
    let mut centroids = seeds;
    let mut clusters = assign(pixels, &centroids);
    let mut iterations = 0;
    let mut converged = false;

    while !converged && iterations < max_iterations {
        iterations += 1;

        let updated = refine(&clusters, &centroids);
        let moved = total_movement(&centroids, &updated);
        converged = moved < CONVERGENCE_THRESHOLD;
        trace!("iteration {iterations}: centroids moved {moved:.6}");

        centroids = updated;
        clusters = assign(pixels, &centroids);
    }

    debug!(
        "clustering finished after {iterations} iterations (converged: {converged}, k = {})",
        centroids.len()
    );

    ClusterRun { centroids, clusters, iterations, converged }
}
