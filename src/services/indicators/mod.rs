//! Technical indicator computation.
//!
//! Derives the indicator-augmented frame the feature builder consumes:
//! SMA 20/50, RSI 14, MACD 12/26/9, Bollinger 20/2, volume SMA 20,
//! daily return and price change.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::bollinger_series;
pub use ema::ema_series;
pub use macd::macd_series;
pub use rsi::rsi_series;
pub use sma::{rolling_std_series, sma_series};

use crate::types::{Candle, IndicatorRow};

const SMA_FAST: usize = 20;
const SMA_SLOW: usize = 50;
const RSI_PERIOD: usize = 14;
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;
const BB_WINDOW: usize = 20;
const BB_MULTIPLIER: f64 = 2.0;
const VOLUME_SMA: usize = 20;

/// Computes the full indicator frame for an OHLCV series.
pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Augment a series with all indicator columns.
    ///
    /// Rows where any indicator lacks trailing history are dropped, so
    /// the output only contains fully-populated rows. A series shorter
    /// than the longest warm-up (SMA 50) yields an empty frame.
    pub fn compute(candles: &[Candle]) -> Vec<IndicatorRow> {
        if candles.len() < SMA_SLOW {
            return Vec::new();
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

        let sma_20 = sma_series(&closes, SMA_FAST);
        let sma_50 = sma_series(&closes, SMA_SLOW);
        let rsi = rsi_series(&closes, RSI_PERIOD);
        let (macd, macd_signal) = macd_series(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
        let (bb_upper, bb_lower) = bollinger_series(&closes, BB_WINDOW, BB_MULTIPLIER);
        let volume_sma = sma_series(&volumes, VOLUME_SMA);

        let mut rows = Vec::with_capacity(candles.len());
        for (i, candle) in candles.iter().enumerate() {
            // First row has no previous close for return/change columns
            if i == 0 {
                continue;
            }
            let prev_close = closes[i - 1];

            let (Some(sma_20), Some(sma_50), Some(rsi), Some(macd), Some(macd_signal)) =
                (sma_20[i], sma_50[i], rsi[i], macd[i], macd_signal[i])
            else {
                continue;
            };
            let (Some(bb_upper), Some(bb_lower), Some(volume_sma)) =
                (bb_upper[i], bb_lower[i], volume_sma[i])
            else {
                continue;
            };

            rows.push(IndicatorRow {
                time: candle.time,
                open: candle.open,
                high: candle.high,
                low: candle.low,
                close: candle.close,
                volume: candle.volume,
                sma_20,
                sma_50,
                rsi,
                macd,
                macd_signal,
                bb_upper,
                bb_lower,
                volume_sma,
                daily_return: (candle.close - prev_close) / prev_close,
                price_change: candle.close - prev_close,
            });
        }

        rows
    }
}
