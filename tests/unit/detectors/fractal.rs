//! Unit tests for the fractal level detector

use chrono::DateTime;
use strata::common::math::mean_candle_range;
use strata::detectors::fractal::calculate_fractal_levels;
use strata::detectors::DetectorError;
use strata::models::{Candle, LevelKind, PriceSeries};

/// Build a series from (high, low) pairs; open/close sit at the midpoint
fn series_from_hl(points: &[(f64, f64)]) -> PriceSeries {
    let candles = points
        .iter()
        .enumerate()
        .map(|(i, &(high, low))| {
            let mid = (high + low) / 2.0;
            let timestamp = DateTime::from_timestamp(1_700_000_000 + i as i64 * 60, 0).unwrap();
            Candle::new(mid, high, low, mid, timestamp)
        })
        .collect();
    PriceSeries::new(candles).expect("valid test series")
}

fn series_from_lows(lows: &[f64]) -> PriceSeries {
    let points: Vec<(f64, f64)> = lows.iter().map(|&low| (low + 1.0, low)).collect();
    series_from_hl(&points)
}

#[test]
fn test_fractal_min_length_enforced() {
    let series = series_from_lows(&[1.0, 2.0, 3.0, 4.0]);
    let result = calculate_fractal_levels(&series);
    assert!(matches!(result, Err(DetectorError::InvalidInput(_))));
}

#[test]
fn test_fractal_minimum_series_without_patterns_is_empty() {
    let series = series_from_lows(&[2.0, 2.0, 2.0, 2.0, 2.0]);
    let levels = calculate_fractal_levels(&series).expect("valid length");
    assert!(levels.is_empty());
}

#[test]
fn test_fractal_detects_support() {
    let series = series_from_lows(&[5.0, 4.0, 1.0, 2.0, 3.0]);
    let levels = calculate_fractal_levels(&series).expect("detection succeeds");

    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].price, 1.0);
    assert_eq!(levels[0].index, Some(2));
    assert_eq!(levels[0].kind, Some(LevelKind::Support));
}

#[test]
fn test_fractal_detects_resistance() {
    let series = series_from_hl(&[(2.0, 1.0), (3.0, 1.0), (6.0, 1.0), (5.0, 1.0), (4.0, 1.0)]);
    let levels = calculate_fractal_levels(&series).expect("detection succeeds");

    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].price, 6.0);
    assert_eq!(levels[0].index, Some(2));
    assert_eq!(levels[0].kind, Some(LevelKind::Resistance));
}

#[test]
fn test_fractal_monotonic_lows_produce_no_supports() {
    let lows: Vec<f64> = (0..10).map(|i| 10.0 + i as f64).collect();
    let series = series_from_lows(&lows);
    let levels = calculate_fractal_levels(&series).expect("detection succeeds");

    assert!(levels
        .iter()
        .all(|level| level.kind != Some(LevelKind::Support)));
}

#[test]
fn test_fractal_deduplicates_nearby_levels() {
    // supports at 1.0 (i=2) and 1.2 (i=7) sit closer together than the mean
    // candle range of 1.0; the later one must be suppressed
    let lows = [5.0, 4.0, 1.0, 2.0, 3.0, 5.0, 4.5, 1.2, 2.2, 3.2];
    let series = series_from_lows(&lows);
    let levels = calculate_fractal_levels(&series).expect("detection succeeds");

    assert!(!levels.iter().any(|level| level.index == Some(7)));

    let threshold = mean_candle_range(series.candles());
    for (a, pair) in levels.iter().enumerate() {
        for other in levels.iter().skip(a + 1) {
            assert!((pair.price - other.price).abs() >= threshold);
        }
    }
}

#[test]
fn test_fractal_levels_in_ascending_index_order() {
    let lows = [5.0, 4.0, 1.0, 2.0, 3.0, 5.0, 4.5, 1.2, 2.2, 3.2];
    let series = series_from_lows(&lows);
    let levels = calculate_fractal_levels(&series).expect("detection succeeds");

    let indices: Vec<usize> = levels.iter().filter_map(|level| level.index).collect();
    assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_fractal_levels_within_series_bounds() {
    let lows = [5.0, 4.0, 1.0, 2.0, 3.0, 5.0, 4.5, 1.2, 2.2, 3.2];
    let series = series_from_lows(&lows);
    let levels = calculate_fractal_levels(&series).expect("detection succeeds");

    let min_low = series.lows().iter().cloned().fold(f64::INFINITY, f64::min);
    let max_high = series
        .highs()
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(!levels.is_empty());
    assert!(levels
        .iter()
        .all(|level| level.price >= min_low && level.price <= max_high));
}
