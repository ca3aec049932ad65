//! Market-wide up/down verdict.
//!
//! Labels each historical day by the next day's direction, fits the
//! seeded forest on two features (daily return and 30-day rolling
//! return volatility) and reports the tree vote for the latest row.

use crate::services::indicators::rolling_std_series;
use crate::services::model::{ForestConfig, RandomForestRegressor};
use crate::types::{Candle, MarketTrend, TrendDirection};
use tracing::debug;

/// Rolling window for return volatility.
const VOLATILITY_WINDOW: usize = 30;

/// Minimum labeled rows needed before a verdict is worth giving.
const MIN_ROWS: usize = 10;

/// Compute the up/down verdict for a fetched series.
///
/// Returns `None` when the series is too short to build the feature
/// rows (volatility needs 30 returns).
pub fn market_trend(ticker: &str, candles: &[Candle]) -> Option<MarketTrend> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    if closes.len() < VOLATILITY_WINDOW + MIN_ROWS + 2 {
        debug!("Series for {} too short for trend verdict", ticker);
        return None;
    }

    let returns: Vec<f64> = closes.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
    let volatility = rolling_std_series(&returns, VOLATILITY_WINDOW);

    // Feature rows where volatility is defined; label = next-day direction.
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<f64> = Vec::new();
    let mut latest: Option<Vec<f64>> = None;

    for i in 0..returns.len() {
        let Some(vol) = volatility[i] else { continue };
        let row = vec![returns[i], vol];
        if i + 1 < returns.len() {
            rows.push(row);
            labels.push(if returns[i + 1] > 0.0 { 1.0 } else { 0.0 });
        } else {
            latest = Some(row);
        }
    }

    let latest = latest?;
    if rows.len() < MIN_ROWS {
        return None;
    }

    let forest = RandomForestRegressor::fit(&rows, &labels, ForestConfig::default());
    let up_probability = forest.vote_share(&latest, 0.5);
    let direction = if up_probability > 0.5 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    Some(MarketTrend {
        ticker: ticker.to_uppercase(),
        direction,
        up_probability,
        down_probability: 1.0 - up_probability,
    })
}
