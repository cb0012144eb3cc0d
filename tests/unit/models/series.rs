//! Unit tests for candle and series validation

use chrono::DateTime;
use strata::models::{Candle, PriceSeries, SeriesError};

fn candle_at(open: f64, high: f64, low: f64, close: f64, offset: i64) -> Candle {
    let timestamp = DateTime::from_timestamp(1_700_000_000 + offset * 60, 0).unwrap();
    Candle::new(open, high, low, close, timestamp)
}

fn simple_candle(high: f64, low: f64, offset: i64) -> Candle {
    let mid = (high + low) / 2.0;
    candle_at(mid, high, low, mid, offset)
}

#[test]
fn test_series_construction_and_accessors() {
    let series = PriceSeries::new(vec![
        simple_candle(11.0, 10.0, 0),
        simple_candle(12.0, 11.0, 1),
        simple_candle(13.0, 12.0, 2),
    ])
    .expect("valid series");

    assert_eq!(series.len(), 3);
    assert!(!series.is_empty());
    assert_eq!(series.lows(), vec![10.0, 11.0, 12.0]);
    assert_eq!(series.highs(), vec![11.0, 12.0, 13.0]);
    assert_eq!(series.get(1).unwrap().low, 11.0);
    assert!(series.get(3).is_none());
}

#[test]
fn test_empty_series_is_allowed() {
    let series = PriceSeries::new(Vec::new()).expect("empty series is valid");
    assert!(series.is_empty());
}

#[test]
fn test_candle_range() {
    assert!((simple_candle(12.5, 10.0, 0).range() - 2.5).abs() < 1e-12);
}

#[test]
fn test_rejects_equal_timestamps() {
    let result = PriceSeries::new(vec![
        simple_candle(11.0, 10.0, 0),
        simple_candle(12.0, 11.0, 0),
    ]);
    assert!(matches!(result, Err(SeriesError::OutOfOrder(1))));
}

#[test]
fn test_rejects_backwards_timestamps() {
    let result = PriceSeries::new(vec![
        simple_candle(11.0, 10.0, 5),
        simple_candle(12.0, 11.0, 1),
    ]);
    assert!(matches!(result, Err(SeriesError::OutOfOrder(1))));
}

#[test]
fn test_rejects_high_below_low() {
    let result = PriceSeries::new(vec![candle_at(10.0, 9.5, 10.5, 10.0, 0)]);
    assert!(matches!(
        result,
        Err(SeriesError::InvalidCandle { index: 0, .. })
    ));
}

#[test]
fn test_rejects_close_above_high() {
    let result = PriceSeries::new(vec![candle_at(10.0, 10.5, 9.5, 11.0, 0)]);
    assert!(matches!(
        result,
        Err(SeriesError::InvalidCandle { index: 0, .. })
    ));
}

#[test]
fn test_rejects_open_below_low() {
    let result = PriceSeries::new(vec![candle_at(9.0, 10.5, 9.5, 10.0, 0)]);
    assert!(matches!(
        result,
        Err(SeriesError::InvalidCandle { index: 0, .. })
    ));
}

#[test]
fn test_rejects_non_finite_price() {
    let result = PriceSeries::new(vec![candle_at(10.0, f64::NAN, 9.5, 10.0, 0)]);
    assert!(matches!(
        result,
        Err(SeriesError::InvalidCandle { index: 0, .. })
    ));
}
