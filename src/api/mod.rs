pub mod alerts;
pub mod analysis;
pub mod health;
pub mod market;
pub mod stocks;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(market::symbols_router())
        .nest("/api/stocks", stocks::router())
        .nest("/api/market", market::router())
        .nest("/api/analysis", analysis::router())
        .nest("/api/alerts", alerts::router())
}
