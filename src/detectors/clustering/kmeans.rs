//! Seeded 1-D k-means with k-means++ initialization

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::detectors::error::DetectorError;

pub(crate) const MAX_ITERATIONS: usize = 300;
pub(crate) const RESTARTS: usize = 10;

#[derive(Debug, Clone)]
pub(crate) struct KMeansFit {
    pub centroids: Vec<f64>,
    pub inertia: f64,
    pub converged: bool,
}

/// Fit k centers to a 1-D sample, keeping the best of [`RESTARTS`]
/// independent runs.
///
/// Restart seeds are derived from `(seed, k, restart)`, so a fit for a given
/// k is reproducible regardless of sweep order.
pub(crate) fn fit(values: &[f64], k: usize, seed: u64) -> Result<KMeansFit, DetectorError> {
    let mut best = run_restart(values, k, seed, 0);
    let mut any_converged = best.converged;

    for restart in 1..RESTARTS {
        let fit = run_restart(values, k, seed, restart);
        any_converged |= fit.converged;
        if fit.inertia < best.inertia {
            best = fit;
        }
    }

    if !any_converged {
        return Err(DetectorError::ClusteringFailure(format!(
            "no restart converged within {MAX_ITERATIONS} iterations for k={k}"
        )));
    }
    Ok(best)
}

fn run_restart(values: &[f64], k: usize, seed: u64, restart: usize) -> KMeansFit {
    let mut rng = StdRng::seed_from_u64(restart_seed(seed, k, restart));
    let centroids = init_centroids(values, k, &mut rng);
    run_lloyd(values, centroids)
}

fn restart_seed(seed: u64, k: usize, restart: usize) -> u64 {
    seed.wrapping_mul(31)
        .wrapping_add((k * RESTARTS + restart) as u64)
}

/// k-means++ seeding: first center uniform, each further center sampled
/// with probability proportional to squared distance from the nearest
/// already-chosen center.
fn init_centroids(values: &[f64], k: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut centroids = Vec::with_capacity(k);
    let first = values[rng.gen_range(0..values.len())];
    centroids.push(first);

    let mut dist_sq: Vec<f64> = values.iter().map(|v| (v - first).powi(2)).collect();

    while centroids.len() < k {
        let total: f64 = dist_sq.iter().sum();
        let next = if total > 0.0 {
            let target = rng.gen_range(0.0..total);
            let mut acc = 0.0;
            let mut chosen = values.len() - 1;
            for (i, d) in dist_sq.iter().enumerate() {
                acc += d;
                if acc > target {
                    chosen = i;
                    break;
                }
            }
            values[chosen]
        } else {
            // every point already coincides with a center
            values[rng.gen_range(0..values.len())]
        };
        centroids.push(next);
        for (i, v) in values.iter().enumerate() {
            dist_sq[i] = dist_sq[i].min((v - next).powi(2));
        }
    }
    centroids
}

fn run_lloyd(values: &[f64], mut centroids: Vec<f64>) -> KMeansFit {
    let mut assignments: Vec<usize> = values
        .iter()
        .map(|v| nearest_centroid(*v, &centroids))
        .collect();

    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        update_centroids(values, &assignments, &mut centroids);
        let reassigned: Vec<usize> = values
            .iter()
            .map(|v| nearest_centroid(*v, &centroids))
            .collect();
        if reassigned == assignments {
            converged = true;
            break;
        }
        assignments = reassigned;
    }

    let inertia = values
        .iter()
        .zip(&assignments)
        .map(|(v, &a)| (v - centroids[a]).powi(2))
        .sum();

    KMeansFit {
        centroids,
        inertia,
        converged,
    }
}

fn update_centroids(values: &[f64], assignments: &[usize], centroids: &mut [f64]) {
    let mut sums = vec![0.0; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];
    for (v, &a) in values.iter().zip(assignments) {
        sums[a] += v;
        counts[a] += 1;
    }
    for (i, centroid) in centroids.iter_mut().enumerate() {
        // a center that lost all points keeps its position
        if counts[i] > 0 {
            *centroid = sums[i] / counts[i] as f64;
        }
    }
}

fn nearest_centroid(value: f64, centroids: &[f64]) -> usize {
    let mut nearest = 0;
    let mut best = (value - centroids[0]).powi(2);
    for (i, c) in centroids.iter().enumerate().skip(1) {
        let d = (value - c).powi(2);
        if d < best {
            best = d;
            nearest = i;
        }
    }
    nearest
}
