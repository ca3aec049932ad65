//! Aurex - stock prediction and alerting server.
//!
//! Fetches OHLCV history from Yahoo Finance, augments it with technical
//! indicators, trains a seeded random forest per request and serves
//! predictions, market trend verdicts, fundamentals analysis and price
//! alerts over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::{AlertService, Cache, StockPredictor};
use sources::YahooFinanceClient;
use std::sync::Arc;
use types::Candle;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<YahooFinanceClient>,
    pub predictor: Arc<StockPredictor>,
    pub alert_service: Arc<AlertService>,
}

impl AppState {
    /// Wire up the full service graph from a config.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let source = Arc::new(YahooFinanceClient::new(std::time::Duration::from_secs(
            config.fetch_timeout_secs,
        )));
        let series_cache = Arc::new(Cache::<Vec<Candle>>::new(
            std::time::Duration::from_secs(config.series_cache_secs),
        ));
        let predictor = Arc::new(StockPredictor::new(source.clone(), series_cache));
        let alert_service = Arc::new(AlertService::new(
            services::alerts::AlertStore::load(&config.alerts_file),
            source.clone(),
        ));

        Self {
            config,
            source,
            predictor,
            alert_service,
        }
    }
}
