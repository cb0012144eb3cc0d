//! Strata demo entrypoint
//!
//! Fetches a trading pair and logs the levels found by all three detectors.

use dotenvy::dotenv;
use strata::config::{self, Config};
use strata::detectors::{
    calculate_fractal_levels, calculate_kmeans_levels, calculate_window_shift_levels,
};
use strata::logging;
use strata::services::cache::CachingProvider;
use strata::services::market_data::MarketDataProvider;
use strata::services::yahoo::YahooFinanceProvider;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    info!(environment = %config::get_environment(), "Starting Strata level engine");

    let provider = CachingProvider::new(YahooFinanceProvider::new());
    let series = provider
        .fetch_series(&config.symbol, &config.period, &config.interval)
        .await?;
    info!(
        symbol = %config.symbol,
        period = %config.period,
        interval = %config.interval,
        candles = series.len(),
        "Fetched price series"
    );

    let clustered =
        calculate_kmeans_levels(&series.lows(), config.saturation_point, config.kmeans_seed)?;
    info!(levels = ?clustered, "Clustering levels over lows");

    let fractals = calculate_fractal_levels(&series)?;
    for level in &fractals {
        info!(price = level.price, index = ?level.index, kind = ?level.kind, "Fractal level");
    }

    let pivots = calculate_window_shift_levels(&series)?;
    for level in &pivots {
        info!(price = level.price, index = ?level.index, kind = ?level.kind, "Window-shift pivot");
    }

    Ok(())
}
