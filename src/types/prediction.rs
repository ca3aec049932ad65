use serde::{Deserialize, Serialize};

/// Details about the model fit behind a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingInfo {
    /// Mean absolute error on the held-out test partition (price units).
    pub mae: f64,
    /// Date the model was trained (YYYY-MM-DD).
    pub last_training_date: String,
    /// Feature column names, in table order.
    pub features_used: Vec<String>,
}

/// A single forward price estimate for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub symbol: String,
    pub current_price: f64,
    pub predicted_price: f64,
    /// Calendar date the estimate refers to (YYYY-MM-DD).
    pub prediction_date: String,
    pub days_ahead: u32,
    pub price_change_pct: f64,
    pub training_info: TrainingInfo,
    /// `clamp(100 - mae, 0, 100)`. A crude heuristic, not a calibrated
    /// probability.
    pub confidence: f64,
}

/// Market-wide direction verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Up/down verdict for a ticker, with forest vote shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTrend {
    pub ticker: String,
    pub direction: TrendDirection,
    pub up_probability: f64,
    pub down_probability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_result_serialization() {
        let result = PredictionResult {
            symbol: "AAPL".to_string(),
            current_price: 150.0,
            predicted_price: 155.5,
            prediction_date: "2024-01-20".to_string(),
            days_ahead: 5,
            price_change_pct: 3.67,
            training_info: TrainingInfo {
                mae: 2.5,
                last_training_date: "2024-01-15".to_string(),
                features_used: vec!["Close".to_string(), "RSI".to_string()],
            },
            confidence: 97.5,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["training_info"]["mae"], 2.5);
        assert_eq!(json["confidence"], 97.5);
    }

    #[test]
    fn test_trend_direction_lowercase() {
        assert_eq!(serde_json::to_string(&TrendDirection::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&TrendDirection::Down).unwrap(),
            "\"down\""
        );
    }
}
