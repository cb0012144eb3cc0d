//! In-memory memoization for fetched series and computed levels.
//!
//! Both caches are unbounded maps; eviction and TTL policy belong to the
//! caller.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::PriceSeries;
use crate::services::market_data::{MarketDataProvider, ProviderError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub symbol: String,
    pub period: String,
    pub interval: String,
}

impl SeriesKey {
    pub fn new(symbol: &str, period: &str, interval: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            period: period.to_string(),
            interval: interval.to_string(),
        }
    }
}

/// Cache of fetched series keyed by (symbol, period, interval)
#[derive(Default)]
pub struct SeriesCache {
    entries: RwLock<HashMap<SeriesKey, Arc<PriceSeries>>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &SeriesKey) -> Option<Arc<PriceSeries>> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn insert(&self, key: SeriesKey, series: PriceSeries) -> Arc<PriceSeries> {
        let series = Arc::new(series);
        self.entries.write().await.insert(key, series.clone());
        series
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Identity hash over a series' timestamps and prices
pub fn series_fingerprint(series: &PriceSeries) -> u64 {
    let mut hasher = DefaultHasher::new();
    series.len().hash(&mut hasher);
    for candle in series.candles() {
        candle.timestamp.timestamp().hash(&mut hasher);
        candle.open.to_bits().hash(&mut hasher);
        candle.high.to_bits().hash(&mut hasher);
        candle.low.to_bits().hash(&mut hasher);
        candle.close.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

/// Key for a memoized clustering run: series identity plus the parameters
/// that change its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelKey {
    fingerprint: u64,
    saturation_bits: u64,
    seed: u64,
}

impl LevelKey {
    pub fn new(series: &PriceSeries, saturation_point: f64, seed: u64) -> Self {
        Self {
            fingerprint: series_fingerprint(series),
            saturation_bits: saturation_point.to_bits(),
            seed,
        }
    }
}

/// Cache of computed clustering levels
#[derive(Default)]
pub struct LevelCache {
    entries: RwLock<HashMap<LevelKey, Arc<Vec<f64>>>>,
}

impl LevelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &LevelKey) -> Option<Arc<Vec<f64>>> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn insert(&self, key: LevelKey, levels: Vec<f64>) -> Arc<Vec<f64>> {
        let levels = Arc::new(levels);
        self.entries.write().await.insert(key, levels.clone());
        levels
    }
}

/// Decorator that memoizes another provider's fetches
pub struct CachingProvider<P> {
    inner: P,
    cache: SeriesCache,
}

impl<P> CachingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: SeriesCache::new(),
        }
    }
}

#[async_trait]
impl<P: MarketDataProvider> MarketDataProvider for CachingProvider<P> {
    async fn fetch_series(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceSeries, ProviderError> {
        let key = SeriesKey::new(symbol, period, interval);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok((*hit).clone());
        }
        let series = self.inner.fetch_series(symbol, period, interval).await?;
        self.cache.insert(key, series.clone()).await;
        Ok(series)
    }
}
