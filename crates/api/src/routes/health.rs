use axum::{Json, extract::State};
use parole_services::HealthReport;
use serde_json::{Value, json};

use crate::{error::ApiError, state::AppState};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "API Assistant Vocal & Chat Bot Teranga AI",
        "status": "active",
    }))
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthReport>, ApiError> {
    let monitor = state.health.clone();
    let report = tokio::task::spawn_blocking(move || monitor.check())
        .await
        .map_err(|e| ApiError::ServiceUnavailable(format!("Health check failed: {}", e)))??;
    Ok(Json(report))
}
