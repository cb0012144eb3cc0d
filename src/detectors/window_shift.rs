//! Sliding-window persistent-extremum level detection

use crate::common::math;
use crate::detectors::error::DetectorError;
use crate::detectors::is_far_from_levels;
use crate::models::{Candle, Level, PriceSeries};

const MIN_CANDLES: usize = 11;

/// Number of consecutive windows an extremum must survive to become a pivot
const STREAK_TARGET: usize = 5;

/// Calculate support/resistance pivots from sliding-window extrema.
///
/// At each position the rolling maximum of highs (9-candle window) and the
/// rolling minimum of lows (10-candle window) are tracked. An extremum that
/// persists across exactly [`STREAK_TARGET`] consecutive windows becomes a
/// pivot, anchored at the candle where it first occurs. Both sides share one
/// pivot list, so a max-side pivot suppresses a nearby min-side pivot and
/// vice versa.
///
/// Output is in detection order: ascending position, max side before min
/// side within a position.
pub fn calculate_window_shift_levels(series: &PriceSeries) -> Result<Vec<Level>, DetectorError> {
    if series.len() < MIN_CANDLES {
        return Err(DetectorError::InvalidInput(format!(
            "window-shift detection requires at least {MIN_CANDLES} candles, got {}",
            series.len()
        )));
    }

    let candles = series.candles();
    let min_distance = math::mean_candle_range(candles);
    let mut pivots: Vec<Level> = Vec::new();
    let mut max_streak = Streak::new();
    let mut min_streak = Streak::new();

    for i in 5..candles.len() - 5 {
        let (max_index, max_value) = window_max(candles, i - 5, i + 3);
        if max_streak.observe(max_value) == STREAK_TARGET
            && is_far_from_levels(max_value, &pivots, min_distance)
        {
            pivots.push(Level::resistance(max_value, max_index));
        }

        let (min_index, min_value) = window_min(candles, i - 5, i + 4);
        if min_streak.observe(min_value) == STREAK_TARGET
            && is_far_from_levels(min_value, &pivots, min_distance)
        {
            pivots.push(Level::support(min_value, min_index));
        }
    }

    Ok(pivots)
}

/// Run length of the currently tracked extremum value.
///
/// Consecutive windows hand over the exact same source candle, so equality
/// here is exact, not tolerance-based.
struct Streak {
    last: Option<f64>,
    count: usize,
}

impl Streak {
    fn new() -> Self {
        Self {
            last: None,
            count: 0,
        }
    }

    /// Advance the streak with the current window's extremum and return the
    /// updated run length.
    fn observe(&mut self, value: f64) -> usize {
        match self.last {
            Some(last) if last == value => self.count += 1,
            _ => {
                self.last = Some(value);
                self.count = 1;
            }
        }
        self.count
    }
}

/// First-occurrence maximum of highs over `start..=end`
fn window_max(candles: &[Candle], start: usize, end: usize) -> (usize, f64) {
    let mut index = start;
    let mut value = candles[start].high;
    for j in start + 1..=end {
        if candles[j].high > value {
            value = candles[j].high;
            index = j;
        }
    }
    (index, value)
}

/// First-occurrence minimum of lows over `start..=end`
fn window_min(candles: &[Candle], start: usize, end: usize) -> (usize, f64) {
    let mut index = start;
    let mut value = candles[start].low;
    for j in start + 1..=end {
        if candles[j].low < value {
            value = candles[j].low;
            index = j;
        }
    }
    (index, value)
}
