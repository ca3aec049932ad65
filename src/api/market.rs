use crate::config::POPULAR_STOCKS;
use crate::error::{AppError, Result};
use crate::services::summary::{self, SymbolSummary, DEFAULT_SUMMARY_SYMBOLS};
use crate::services::trend;
use crate::types::MarketTrend;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct SymbolEntry {
    name: &'static str,
    symbol: &'static str,
}

/// GET /api/symbols
async fn get_symbols() -> Json<Vec<SymbolEntry>> {
    Json(
        POPULAR_STOCKS
            .iter()
            .map(|s| SymbolEntry {
                name: s.name,
                symbol: s.symbol,
            })
            .collect(),
    )
}

async fn trend_for(state: &AppState, ticker: &str) -> Result<MarketTrend> {
    let candles = state
        .predictor
        .fetch_series(ticker, &state.config.default_range, "1d")
        .await;
    if candles.is_empty() {
        return Err(AppError::NotFound(format!("no data for {}", ticker)));
    }

    trend::market_trend(ticker, &candles).ok_or_else(|| {
        AppError::InsufficientHistory(format!("not enough history for {}", ticker))
    })
}

/// GET /api/market/prediction
async fn get_market_prediction(State(state): State<AppState>) -> Result<Json<MarketTrend>> {
    let ticker = state.config.market_ticker.clone();
    Ok(Json(trend_for(&state, &ticker).await?))
}

/// Query params for the summary endpoint.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Comma-separated symbol list; defaults to the major tickers.
    #[serde(default)]
    pub symbols: Option<String>,
}

fn requested_symbols(query: &SummaryQuery) -> Vec<String> {
    match query.symbols.as_deref() {
        Some(list) => list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => DEFAULT_SUMMARY_SYMBOLS.iter().map(|s| s.to_string()).collect(),
    }
}

/// GET /api/market/summary
async fn get_market_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Json<Vec<SymbolSummary>> {
    let symbols = requested_symbols(&query);
    Json(summary::market_summary(&state.source, &symbols).await)
}

/// GET /api/market/prediction/:ticker
async fn get_ticker_prediction(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<MarketTrend>> {
    Ok(Json(trend_for(&state, &ticker).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_market_summary))
        .route("/prediction", get(get_market_prediction))
        .route("/prediction/:ticker", get(get_ticker_prediction))
}

pub fn symbols_router() -> Router<AppState> {
    Router::new().route("/api/symbols", get(get_symbols))
}
