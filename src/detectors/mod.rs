//! Support/resistance level detectors.
//!
//! Three independent algorithms map a price series to horizontal levels:
//! elbow-method k-means clustering over a single price column, 5-point
//! fractal patterns, and sliding-window persistent extrema. All three are
//! pure functions over an immutable series.

pub mod clustering;
pub mod error;
pub mod fractal;
pub mod window_shift;

pub use clustering::calculate_kmeans_levels;
pub use error::DetectorError;
pub use fractal::calculate_fractal_levels;
pub use window_shift::calculate_window_shift_levels;

use crate::models::Level;

/// Whether a candidate price is far enough from every accepted level.
///
/// Two levels closer than `min_distance` (the series' mean candle range)
/// count as the same level; the earlier one wins.
pub fn is_far_from_levels(price: f64, levels: &[Level], min_distance: f64) -> bool {
    levels
        .iter()
        .all(|level| (price - level.price).abs() >= min_distance)
}
