//! Market data provider interface

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{PriceSeries, SeriesError};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("provider returned no usable data for {0}")]
    EmptyResponse(String),

    #[error("provider returned an invalid series: {0}")]
    InvalidSeries(#[from] SeriesError),
}

impl ProviderError {
    /// Transport failures and server errors are worth retrying; malformed
    /// payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().map_or(true, |s| s.is_server_error())
            }
            _ => false,
        }
    }
}

/// A source of historical OHLC data.
///
/// `period` and `interval` use the provider's own vocabulary (e.g. `5d`,
/// `30m`). Retry and backoff semantics are the implementation's concern.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_series(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceSeries, ProviderError>;
}
