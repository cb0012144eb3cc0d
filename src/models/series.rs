//! OHLC candles and the validated price series they form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single OHLC observation for one time interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            open,
            high,
            low,
            close,
            timestamp,
        }
    }

    /// High-to-low span of the candle
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    fn validate(&self) -> Result<(), &'static str> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err("non-finite price");
        }
        if self.high < self.low {
            return Err("high below low");
        }
        if self.open > self.high || self.close > self.high {
            return Err("open/close above high");
        }
        if self.open < self.low || self.close < self.low {
            return Err("open/close below low");
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: &'static str },

    #[error("timestamps not strictly increasing at index {0}")]
    OutOfOrder(usize),
}

/// Immutable, time-ordered sequence of candles.
///
/// Construction validates every candle and requires strictly increasing
/// timestamps; the inner vector is never exposed mutably afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        for (index, candle) in candles.iter().enumerate() {
            candle
                .validate()
                .map_err(|reason| SeriesError::InvalidCandle { index, reason })?;
        }
        for (index, pair) in candles.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(SeriesError::OutOfOrder(index + 1));
            }
        }
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Open prices as a standalone column
    pub fn opens(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.open).collect()
    }

    /// High prices as a standalone column
    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    /// Low prices as a standalone column
    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    /// Close prices as a standalone column
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}
