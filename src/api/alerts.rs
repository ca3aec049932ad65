use crate::error::{AppError, Result};
use crate::types::{Alert, NewAlert};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// GET /api/alerts
async fn list_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    Json(state.alert_service.list().await)
}

/// POST /api/alerts
async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<NewAlert>,
) -> Result<(StatusCode, Json<Alert>)> {
    if request.symbol.trim().is_empty() {
        return Err(AppError::BadRequest("symbol must not be empty".to_string()));
    }
    if !request.threshold.is_finite() {
        return Err(AppError::BadRequest("threshold must be finite".to_string()));
    }

    let alert = state.alert_service.add(request).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

/// DELETE /api/alerts/:id
async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>> {
    if !state.alert_service.remove(id).await? {
        return Err(AppError::NotFound(format!("no alert with id {}", id)));
    }
    Ok(Json(json!({ "deleted": id })))
}

/// POST /api/alerts/check
///
/// Runs one evaluation cycle and returns the alerts that fired.
async fn check_alerts(State(state): State<AppState>) -> Result<Json<Vec<Alert>>> {
    let triggered = state.alert_service.check().await?;
    Ok(Json(triggered))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alerts).post(create_alert))
        .route("/:id", delete(delete_alert))
        .route("/check", post(check_alerts))
}
