//! Fractal (5-point local extremum) level detection

use crate::common::math;
use crate::detectors::error::DetectorError;
use crate::detectors::is_far_from_levels;
use crate::models::{Candle, Level, PriceSeries};

const MIN_CANDLES: usize = 5;

/// Calculate support/resistance levels from 5-point fractal patterns.
///
/// A support fractal is a low flanked by strictly higher lows on both sides,
/// with the flanks themselves rising outward; a resistance fractal is the
/// mirrored pattern on highs. The support test wins when both match at the
/// same index.
///
/// Candidates closer than the series' mean candle range to an already
/// accepted level are dropped. Output is in ascending-index order.
pub fn calculate_fractal_levels(series: &PriceSeries) -> Result<Vec<Level>, DetectorError> {
    if series.len() < MIN_CANDLES {
        return Err(DetectorError::InvalidInput(format!(
            "fractal detection requires at least {MIN_CANDLES} candles, got {}",
            series.len()
        )));
    }

    let candles = series.candles();
    let min_distance = math::mean_candle_range(candles);
    let mut levels: Vec<Level> = Vec::new();

    for i in 2..candles.len() - 2 {
        if is_support_fractal(candles, i) {
            let price = candles[i].low;
            if is_far_from_levels(price, &levels, min_distance) {
                levels.push(Level::support(price, i));
            }
        } else if is_resistance_fractal(candles, i) {
            let price = candles[i].high;
            if is_far_from_levels(price, &levels, min_distance) {
                levels.push(Level::resistance(price, i));
            }
        }
    }

    Ok(levels)
}

fn is_support_fractal(candles: &[Candle], i: usize) -> bool {
    candles[i].low < candles[i - 1].low
        && candles[i].low < candles[i + 1].low
        && candles[i + 1].low < candles[i + 2].low
        && candles[i - 1].low < candles[i - 2].low
}

fn is_resistance_fractal(candles: &[Candle], i: usize) -> bool {
    candles[i].high > candles[i - 1].high
        && candles[i].high > candles[i + 1].high
        && candles[i + 1].high > candles[i + 2].high
        && candles[i - 1].high > candles[i - 2].high
}
