//! Yahoo Finance chart API market data provider

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::DateTime;
use serde::Deserialize;

use crate::models::{Candle, PriceSeries};
use crate::services::market_data::{MarketDataProvider, ProviderError};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const MAX_RETRIES: usize = 3;

/// Historical OHLC data from the Yahoo Finance v8 chart endpoint.
///
/// Symbols, periods and intervals follow Yahoo's vocabulary (`BTC-USD`,
/// `5d`, `30m`). Rows with missing values are skipped.
pub struct YahooFinanceProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooFinanceProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at a different host, e.g. a mock server in tests
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn request_chart(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<ChartResult, ProviderError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("range", period), ("interval", interval)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let envelope: ChartEnvelope =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        if let Some(error) = envelope.chart.error {
            return Err(ProviderError::Decode(format!(
                "{}: {}",
                error.code, error.description
            )));
        }
        envelope
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| ProviderError::EmptyResponse(symbol.to_string()))
    }
}

impl Default for YahooFinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceSeries, ProviderError> {
        let result = (|| async { self.request_chart(symbol, period, interval).await })
            .retry(ExponentialBuilder::default().with_max_times(MAX_RETRIES))
            .when(ProviderError::is_retryable)
            .await?;

        build_series(symbol, result)
    }
}

fn build_series(symbol: &str, result: ChartResult) -> Result<PriceSeries, ProviderError> {
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::EmptyResponse(symbol.to_string()))?;

    let mut candles = Vec::with_capacity(timestamps.len());
    for (i, &seconds) in timestamps.iter().enumerate() {
        let row = (
            column_value(&quote.open, i),
            column_value(&quote.high, i),
            column_value(&quote.low, i),
            column_value(&quote.close, i),
        );
        let (Some(open), Some(high), Some(low), Some(close)) = row else {
            continue;
        };
        let timestamp = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| ProviderError::Decode(format!("timestamp {seconds} out of range")))?;
        candles.push(Candle::new(open, high, low, close, timestamp));
    }

    if candles.is_empty() {
        return Err(ProviderError::EmptyResponse(symbol.to_string()));
    }
    Ok(PriceSeries::new(candles)?)
}

fn column_value(column: &[Option<f64>], index: usize) -> Option<f64> {
    column.get(index).copied().flatten()
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}
