//! Train/evaluate/predict pipeline.
//!
//! Chronological split, train-only scaling, a seeded regression forest,
//! MAE evaluation and a single forward price estimate.

pub mod forest;
pub mod scaler;

pub use forest::{ForestConfig, RandomForestRegressor};
pub use scaler::StandardScaler;

use crate::services::features::FeatureTable;
use thiserror::Error;

/// Fraction of rows used for training in the chronological split.
const TRAIN_FRACTION: f64 = 0.8;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("not enough rows for a train/test split ({0})")]
    InsufficientRows(usize),

    #[error("degenerate training data: {0}")]
    Degenerate(String),
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Forward price estimate for the table's most recent row.
    pub predicted_price: f64,
    /// MAE on the held-out test partition, in price units.
    pub mae: f64,
    /// `clamp(100 - mae, 0, 100)`.
    pub confidence: f64,
    /// Feature column names used for the fit.
    pub features_used: Vec<String>,
}

/// Per-request train-and-predict pipeline. Stateless across invocations;
/// the model is retrained from scratch every call.
pub struct PredictionPipeline {
    config: ForestConfig,
}

impl PredictionPipeline {
    pub fn new() -> Self {
        Self {
            config: ForestConfig::default(),
        }
    }

    /// Train on the table and produce one forward estimate.
    ///
    /// The split is chronological (no shuffling) so no future row leaks
    /// into training, and the scaler is fit on the train partition only.
    /// The forest regresses the ratio of target to row close; leaf
    /// averages cannot leave the training target range, so absolute
    /// prices would pin a trending series to stale levels. Predictions
    /// are mapped back to absolute prices before evaluation.
    pub fn train_and_predict(&self, table: &FeatureTable) -> Result<PipelineOutcome, ModelError> {
        let n = table.len();
        let split = (n as f64 * TRAIN_FRACTION) as usize;
        if split == 0 || split == n {
            return Err(ModelError::InsufficientRows(n));
        }

        if table.row_closes.iter().any(|&c| c <= 0.0) {
            return Err(ModelError::Degenerate("non-positive close".to_string()));
        }
        if table
            .rows
            .iter()
            .any(|row| row.iter().any(|v| !v.is_finite()))
        {
            return Err(ModelError::Degenerate("non-finite feature".to_string()));
        }

        let (train_rows, test_rows) = table.rows.split_at(split);
        let (train_targets, test_targets) = table.targets.split_at(split);
        let (train_closes, test_closes) = table.row_closes.split_at(split);

        // Fit scaling on the training partition only; the same transform
        // is applied to the test rows and the forward-prediction row.
        let scaler = StandardScaler::fit(train_rows);
        let scaled_train = scaler.transform(train_rows);
        let scaled_test = scaler.transform(test_rows);

        let ratio_targets: Vec<f64> = train_targets
            .iter()
            .zip(train_closes)
            .map(|(target, close)| target / close)
            .collect();

        let forest = RandomForestRegressor::fit(&scaled_train, &ratio_targets, self.config.clone());

        let mae = forest
            .predict(&scaled_test)
            .iter()
            .zip(test_targets.iter().zip(test_closes))
            .map(|(pred, (target, close))| (pred * close - target).abs())
            .sum::<f64>()
            / test_rows.len() as f64;

        if !mae.is_finite() {
            return Err(ModelError::Degenerate("non-finite MAE".to_string()));
        }

        let latest = table
            .latest_row()
            .ok_or_else(|| ModelError::InsufficientRows(0))?;
        let latest_close = *table
            .row_closes
            .last()
            .ok_or_else(|| ModelError::InsufficientRows(0))?;
        let predicted_price = forest.predict_row(&scaler.transform_row(latest)) * latest_close;

        Ok(PipelineOutcome {
            predicted_price,
            mae,
            confidence: (100.0 - mae).clamp(0.0, 100.0),
            features_used: table.feature_names.clone(),
        })
    }
}

impl Default for PredictionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
