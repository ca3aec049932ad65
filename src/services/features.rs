//! Supervised feature table construction.
//!
//! Turns an indicator frame into a training table: selected indicator
//! columns plus lagged closes, with a forward-shifted close as target.

use crate::types::IndicatorRow;

/// Number of trailing close lags used as features.
pub const LAG_WINDOW: usize = 5;

/// Minimum rows required for training; prediction does not proceed on
/// thinner history.
pub const MIN_TRAINING_ROWS: usize = 100;

/// A fully-populated supervised learning table.
///
/// Row `i` holds the features observed at one point in time; `targets[i]`
/// is the close `horizon` rows later and `row_closes[i]` the close at the
/// row itself.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
    pub row_closes: Vec<f64>,
    pub horizon: u32,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most recent feature row (target excluded), the input for the
    /// forward prediction.
    pub fn latest_row(&self) -> Option<&[f64]> {
        self.rows.last().map(|r| r.as_slice())
    }
}

/// Builds feature tables from indicator frames.
pub struct FeatureBuilder;

impl FeatureBuilder {
    /// Feature column names, in table order.
    pub fn feature_names() -> Vec<String> {
        let mut names = vec![
            "Close".to_string(),
            "Volume".to_string(),
            "SMA_20".to_string(),
            "SMA_50".to_string(),
            "RSI".to_string(),
            "MACD".to_string(),
            "MACD_signal".to_string(),
            "BB_upper".to_string(),
            "BB_lower".to_string(),
        ];
        for lag in 1..=LAG_WINDOW {
            names.push(format!("Close_lag_{}", lag));
        }
        names
    }

    /// Build the supervised table for a forecast horizon.
    ///
    /// The first `LAG_WINDOW` rows (incomplete lags) and the last
    /// `horizon` rows (no future target) are dropped. Returns `None`
    /// when the horizon is zero or fewer than [`MIN_TRAINING_ROWS`]
    /// rows survive.
    pub fn build(frame: &[IndicatorRow], horizon: u32) -> Option<FeatureTable> {
        if horizon == 0 {
            return None;
        }
        let horizon_rows = horizon as usize;
        if frame.len() < LAG_WINDOW + horizon_rows {
            return None;
        }

        let mut rows = Vec::new();
        let mut targets = Vec::new();
        let mut row_closes = Vec::new();

        for i in LAG_WINDOW..frame.len() - horizon_rows {
            let row = &frame[i];
            let mut features = vec![
                row.close,
                row.volume,
                row.sma_20,
                row.sma_50,
                row.rsi,
                row.macd,
                row.macd_signal,
                row.bb_upper,
                row.bb_lower,
            ];
            for lag in 1..=LAG_WINDOW {
                features.push(frame[i - lag].close);
            }

            rows.push(features);
            targets.push(frame[i + horizon_rows].close);
            row_closes.push(row.close);
        }

        if rows.len() < MIN_TRAINING_ROWS {
            return None;
        }

        Some(FeatureTable {
            feature_names: Self::feature_names(),
            rows,
            targets,
            row_closes,
            horizon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(count: usize) -> Vec<IndicatorRow> {
        (0..count)
            .map(|i| {
                let close = 100.0 + i as f64;
                IndicatorRow {
                    time: 1_700_000_000_000 + i as i64 * 86_400_000,
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1_000_000.0,
                    sma_20: close - 1.0,
                    sma_50: close - 2.0,
                    rsi: 60.0,
                    macd: 0.5,
                    macd_signal: 0.4,
                    bb_upper: close + 3.0,
                    bb_lower: close - 3.0,
                    volume_sma: 1_000_000.0,
                    daily_return: 0.01,
                    price_change: 1.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_build_drops_lag_head_and_target_tail() {
        let table = FeatureBuilder::build(&frame(150), 5).unwrap();
        assert_eq!(table.len(), 150 - LAG_WINDOW - 5);
        // First surviving row is index 5; its lag-5 close is the frame's first close.
        let first = &table.rows[0];
        assert_eq!(first[0], 105.0); // Close
        assert_eq!(*first.last().unwrap(), 100.0); // Close_lag_5
        assert_eq!(table.targets[0], 110.0); // close 5 rows ahead
    }

    #[test]
    fn test_build_rejects_thin_history() {
        assert!(FeatureBuilder::build(&frame(80), 5).is_none());
        assert!(FeatureBuilder::build(&frame(109), 5).is_none());
        assert!(FeatureBuilder::build(&frame(110), 5).is_some());
    }

    #[test]
    fn test_build_rejects_zero_horizon() {
        assert!(FeatureBuilder::build(&frame(200), 0).is_none());
    }

    #[test]
    fn test_build_empty_frame() {
        assert!(FeatureBuilder::build(&[], 5).is_none());
    }

    #[test]
    fn test_feature_names_match_row_width() {
        let table = FeatureBuilder::build(&frame(150), 5).unwrap();
        assert_eq!(table.feature_names.len(), table.rows[0].len());
        assert_eq!(table.feature_names.len(), 9 + LAG_WINDOW);
        assert_eq!(table.feature_names[9], "Close_lag_1");
    }

    #[test]
    fn test_latest_row_is_last_table_row() {
        let table = FeatureBuilder::build(&frame(150), 5).unwrap();
        assert_eq!(table.latest_row().unwrap(), table.rows.last().unwrap().as_slice());
    }
}
