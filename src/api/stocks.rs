use crate::error::{AppError, Result};
use crate::services::indicators::IndicatorEngine;
use crate::types::{Candle, IndicatorRow, PredictionResult};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

/// Query params for history and indicator endpoints.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
}

/// Query params for the prediction endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub range: Option<String>,
}

async fn fetch_or_404(
    state: &AppState,
    symbol: &str,
    range: &str,
    interval: &str,
) -> Result<Vec<Candle>> {
    let candles = state.predictor.fetch_series(symbol, range, interval).await;
    if candles.is_empty() {
        return Err(AppError::NotFound(format!("no data for {}", symbol)));
    }
    Ok(candles)
}

/// GET /api/stocks/:symbol/history
async fn get_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Candle>>> {
    let range = query.range.as_deref().unwrap_or(&state.config.default_range);
    let interval = query.interval.as_deref().unwrap_or("1d");
    let candles = fetch_or_404(&state, &symbol, range, interval).await?;
    Ok(Json(candles))
}

/// GET /api/stocks/:symbol/history.csv
async fn get_history_csv(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse> {
    let range = query.range.as_deref().unwrap_or(&state.config.default_range);
    let interval = query.interval.as_deref().unwrap_or("1d");
    let candles = fetch_or_404(&state, &symbol, range, interval).await?;

    let mut csv = String::from("time,open,high,low,close,volume\n");
    for c in &candles {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            c.time, c.open, c.high, c.low, c.close, c.volume
        ));
    }

    Ok(([(header::CONTENT_TYPE, "text/csv")], csv))
}

/// GET /api/stocks/:symbol/indicators
///
/// Latest fully-populated indicator row for the series.
async fn get_indicators(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<IndicatorRow>> {
    let range = query.range.as_deref().unwrap_or(&state.config.default_range);
    let candles = fetch_or_404(&state, &symbol, range, "1d").await?;

    let frame = IndicatorEngine::compute(&candles);
    let latest = frame.into_iter().last().ok_or_else(|| {
        AppError::InsufficientHistory(format!("not enough history for {}", symbol))
    })?;

    Ok(Json(latest))
}

/// GET /api/stocks/:symbol/prediction
async fn get_prediction(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<PredictionResult>> {
    let days = query.days.unwrap_or(state.config.default_horizon_days);
    if days == 0 {
        return Err(AppError::BadRequest("days must be at least 1".to_string()));
    }
    let range = query.range.as_deref().unwrap_or(&state.config.default_range);

    let result = state
        .predictor
        .predict(&symbol, range, days)
        .await
        .ok_or_else(|| AppError::NotFound("no prediction available".to_string()))?;

    Ok(Json(result))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:symbol/history", get(get_history))
        .route("/:symbol/history.csv", get(get_history_csv))
        .route("/:symbol/indicators", get(get_indicators))
        .route("/:symbol/prediction", get(get_prediction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_query_defaults() {
        let query: HistoryQuery = serde_json::from_str("{}").unwrap();
        assert!(query.range.is_none());
        assert!(query.interval.is_none());
    }

    #[test]
    fn test_prediction_query_deserialization() {
        let query: PredictionQuery =
            serde_json::from_str(r#"{"days": 10, "range": "2y"}"#).unwrap();
        assert_eq!(query.days, Some(10));
        assert_eq!(query.range, Some("2y".to_string()));
    }
}
