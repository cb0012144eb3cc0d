//! Shared math utilities used across detectors

use crate::models::Candle;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean high-to-low span over a full candle slice.
///
/// This is the distance threshold both pattern detectors use to decide
/// whether two levels are distinct.
pub fn mean_candle_range(candles: &[Candle]) -> f64 {
    let ranges: Vec<f64> = candles.iter().map(Candle::range).collect();
    mean(&ranges).unwrap_or(0.0)
}
