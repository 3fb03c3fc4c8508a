//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{HealthDto, SessionSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Public summary of the running session
pub async fn get_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSummaryDto>, StatusCode> {
    match state.session.summary().await {
        Ok(summary) => Ok(Json(summary.into())),
        Err(e) => {
            tracing::error!("Failed to read session summary: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
