//! End-to-end prediction flow over synthetic series.

use aurex::services::cache::Cache;
use aurex::services::features::FeatureBuilder;
use aurex::services::indicators::IndicatorEngine;
use aurex::services::trend::market_trend;
use aurex::services::StockPredictor;
use aurex::sources::YahooFinanceClient;
use aurex::types::{Candle, TrendDirection};
use std::sync::Arc;
use std::time::Duration;

fn predictor() -> StockPredictor {
    StockPredictor::new(
        Arc::new(YahooFinanceClient::default()),
        Arc::new(Cache::new(Duration::from_secs(60))),
    )
}

fn linear_candles(count: usize, start: f64, slope: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = start + i as f64 * slope;
            Candle {
                time: 1_700_000_000_000 + i as i64 * 86_400_000,
                open: close - slope / 2.0,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 2_000_000.0 + (i % 7) as f64 * 10_000.0,
            }
        })
        .collect()
}

#[test]
fn test_indicator_frame_shape() {
    let candles = linear_candles(200, 100.0, 0.5);
    let frame = IndicatorEngine::compute(&candles);

    // Rows before the slow SMA window fills are dropped.
    assert_eq!(frame.len(), 200 - 49);
    let last = frame.last().unwrap();
    assert_eq!(last.time, candles.last().unwrap().time);
    assert!(last.sma_20 < last.close);
    assert!(last.bb_lower < last.bb_upper);
}

#[test]
fn test_feature_table_matches_pipeline_contract() {
    let candles = linear_candles(200, 100.0, 0.5);
    let frame = IndicatorEngine::compute(&candles);
    let table = FeatureBuilder::build(&frame, 5).expect("table");

    assert_eq!(table.feature_names.len(), 14);
    assert!(table.feature_names.contains(&"Close_lag_5".to_string()));
    assert_eq!(table.rows.len(), table.targets.len());
    assert_eq!(table.rows.len(), table.row_closes.len());
}

#[test]
fn test_uptrend_prediction_exceeds_current_price() {
    let candles = linear_candles(220, 100.0, 0.5);
    let result = predictor()
        .predict_from_series("TEST", &candles, 5)
        .expect("prediction");

    assert_eq!(result.symbol, "TEST");
    assert!(result.predicted_price > result.current_price);
    assert!(result.price_change_pct > 0.0);
    assert!(result.confidence > 0.0 && result.confidence <= 100.0);
    assert_eq!(result.training_info.features_used.len(), 14);
}

#[test]
fn test_prediction_is_deterministic() {
    let candles = linear_candles(200, 50.0, 0.3);
    let p = predictor();
    let a = p.predict_from_series("TEST", &candles, 5).unwrap();
    let b = p.predict_from_series("TEST", &candles, 5).unwrap();

    assert_eq!(a.predicted_price, b.predicted_price);
    assert_eq!(a.training_info.mae, b.training_info.mae);
    assert_eq!(a.confidence, b.confidence);
}

#[test]
fn test_thin_history_yields_no_prediction() {
    // 149 candles leave 100 indicator rows but fewer than 100 feature
    // rows after lags and horizon trimming.
    let candles = linear_candles(149, 100.0, 0.5);
    assert!(predictor().predict_from_series("TEST", &candles, 5).is_none());
}

#[test]
fn test_market_trend_on_sustained_rally() {
    let mut close = 100.0;
    let candles: Vec<Candle> = (0..120)
        .map(|i| {
            close *= if i % 2 == 0 { 1.011 } else { 1.003 };
            Candle {
                time: 1_700_000_000_000 + i as i64 * 86_400_000,
                open: close,
                high: close + 0.5,
                low: close - 0.5,
                close,
                volume: 1_000_000.0,
            }
        })
        .collect();

    let trend = market_trend("^GSPC", &candles).expect("trend");
    assert_eq!(trend.direction, TrendDirection::Up);
    assert!((trend.up_probability + trend.down_probability - 1.0).abs() < 1e-12);
}
