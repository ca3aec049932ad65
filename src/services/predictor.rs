//! Prediction orchestration: fetch, augment, tabulate, train, predict.

use crate::services::cache::{series_key, Cache};
use crate::services::features::FeatureBuilder;
use crate::services::indicators::IndicatorEngine;
use crate::services::model::PredictionPipeline;
use crate::sources::YahooFinanceClient;
use crate::types::{Candle, PredictionResult, TrainingInfo};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Runs the end-to-end prediction flow for a symbol.
///
/// Every failure along the way (no data, thin history, degenerate fit)
/// is recovered as `None` with a log entry; nothing raises past this
/// boundary.
pub struct StockPredictor {
    source: Arc<YahooFinanceClient>,
    series_cache: Arc<Cache<Vec<Candle>>>,
    pipeline: PredictionPipeline,
}

impl StockPredictor {
    pub fn new(source: Arc<YahooFinanceClient>, series_cache: Arc<Cache<Vec<Candle>>>) -> Self {
        Self {
            source,
            series_cache,
            pipeline: PredictionPipeline::new(),
        }
    }

    /// Fetch a series through the TTL cache. Empty means no data.
    pub async fn fetch_series(&self, symbol: &str, range: &str, interval: &str) -> Vec<Candle> {
        let key = series_key(symbol, range, interval);
        if let Some(candles) = self.series_cache.get(&key) {
            debug!("Series cache hit for {}", key);
            return candles;
        }

        let candles = self.source.fetch_series(symbol, range, interval).await;
        if !candles.is_empty() {
            self.series_cache.set(key, candles.clone());
        }
        candles
    }

    /// Train a fresh model and produce one forward estimate.
    pub async fn predict(
        &self,
        symbol: &str,
        range: &str,
        days_ahead: u32,
    ) -> Option<PredictionResult> {
        let candles = self.fetch_series(symbol, range, "1d").await;
        if candles.is_empty() {
            warn!("No data for {}, skipping prediction", symbol);
            return None;
        }

        self.predict_from_series(symbol, &candles, days_ahead)
    }

    /// The fetch-free tail of the flow, shared with tests.
    pub fn predict_from_series(
        &self,
        symbol: &str,
        candles: &[Candle],
        days_ahead: u32,
    ) -> Option<PredictionResult> {
        let frame = IndicatorEngine::compute(candles);
        let Some(table) = FeatureBuilder::build(&frame, days_ahead) else {
            debug!(
                "Insufficient history for {} ({} candles), no prediction",
                symbol,
                candles.len()
            );
            return None;
        };

        let outcome = match self.pipeline.train_and_predict(&table) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Model fit failed for {}: {}", symbol, e);
                return None;
            }
        };

        let current_price = candles.last()?.close;
        let now = Utc::now();

        Some(PredictionResult {
            symbol: symbol.to_uppercase(),
            current_price: round2(current_price),
            predicted_price: round2(outcome.predicted_price),
            prediction_date: (now + Duration::days(days_ahead as i64))
                .format("%Y-%m-%d")
                .to_string(),
            days_ahead,
            price_change_pct: round2(
                (outcome.predicted_price - current_price) / current_price * 100.0,
            ),
            training_info: TrainingInfo {
                mae: outcome.mae,
                last_training_date: now.format("%Y-%m-%d").to_string(),
                features_used: outcome.features_used,
            },
            confidence: outcome.confidence,
        })
    }
}
