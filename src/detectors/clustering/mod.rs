//! Elbow-method k-means clustering over a single price column

mod kmeans;

use tracing::debug;

use crate::detectors::error::DetectorError;

/// Upper bound on the cluster counts tried by the elbow sweep
pub const MAX_CANDIDATE_CLUSTERS: usize = 10;

/// Saturation point used by [`calculate_kmeans_levels_default`]
pub const DEFAULT_SATURATION_POINT: f64 = 0.5;

/// Seed used by [`calculate_kmeans_levels_default`]
pub const DEFAULT_SEED: u64 = 0;

/// One fitted clustering candidate from the elbow sweep
#[derive(Debug, Clone)]
struct ClusterTrial {
    k: usize,
    inertia: f64,
    centroids: Vec<f64>,
}

/// Calculate support/resistance levels by clustering a price column.
///
/// Fits 1-D k-means for k = 1..=min(10, n-1) and picks the cluster count at
/// which inertia stops improving by more than `saturation_point` (elbow
/// method). Returns the chosen centroids sorted ascending.
///
/// Identical `values` and `seed` produce identical output: every restart's
/// RNG seed is derived from `(seed, k, restart)`.
pub fn calculate_kmeans_levels(
    values: &[f64],
    saturation_point: f64,
    seed: u64,
) -> Result<Vec<f64>, DetectorError> {
    if values.len() < 2 {
        return Err(DetectorError::InvalidInput(format!(
            "clustering requires at least 2 observations, got {}",
            values.len()
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(DetectorError::InvalidInput(
            "price column contains a non-finite value".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&saturation_point) {
        return Err(DetectorError::InvalidInput(format!(
            "saturation point {saturation_point} outside [0, 1]"
        )));
    }

    let max_k = MAX_CANDIDATE_CLUSTERS.min(values.len() - 1);
    let mut trials = Vec::with_capacity(max_k);
    for k in 1..=max_k {
        let fit = kmeans::fit(values, k, seed)?;
        let inertia = fit.inertia;
        trials.push(ClusterTrial {
            k,
            inertia,
            centroids: fit.centroids,
        });
        // a perfect fit cannot be improved by more clusters
        if inertia == 0.0 {
            break;
        }
    }

    let optimum = &trials[select_elbow(&trials, saturation_point)];
    debug!(
        optimum_k = optimum.k,
        inertia = optimum.inertia,
        "selected cluster count"
    );

    let mut levels = optimum.centroids.clone();
    levels.sort_by(f64::total_cmp);
    Ok(levels)
}

/// [`calculate_kmeans_levels`] with the standard saturation point (0.5) and
/// seed (0).
pub fn calculate_kmeans_levels_default(values: &[f64]) -> Result<Vec<f64>, DetectorError> {
    calculate_kmeans_levels(values, DEFAULT_SATURATION_POINT, DEFAULT_SEED)
}

/// Scan consecutive trials for the first inertia ratio above the saturation
/// point; fall back to the last trial when nothing triggers.
///
/// The ratio comparison direction is intentional and matches the upstream
/// definition, even though classic elbow criteria trigger on a ratio
/// *dropping below* a threshold.
fn select_elbow(trials: &[ClusterTrial], saturation_point: f64) -> usize {
    let mut optimum = trials.len() - 1;
    for i in 0..trials.len() - 1 {
        // zero inertia leaves the ratio undefined; never triggers selection
        if trials[i].inertia == 0.0 {
            continue;
        }
        let ratio = trials[i + 1].inertia / trials[i].inertia;
        if ratio > saturation_point {
            optimum = i + 1;
            break;
        }
    }
    optimum
}
