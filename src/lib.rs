//! Support and resistance level detection for OHLC candle series.
//!
//! Three independent detectors map a price series to horizontal price
//! levels: elbow-method k-means clustering over a single price column,
//! 5-point fractal patterns, and sliding-window persistent extrema. Market
//! data acquisition and memoization live under [`services`]; rendering the
//! levels is left to consumers.

pub mod common;
pub mod config;
pub mod detectors;
pub mod logging;
pub mod models;
pub mod services;
