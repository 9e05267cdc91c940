use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Liveness probe. Always 200; the body says whether the store answers.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match state.store.ping().await {
        Ok(()) => "Connected",
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach the store");
            "Disconnected"
        }
    };

    let response = HealthResponse {
        status: "API is running".to_string(),
        database: db_status.to_string(),
    };

    (StatusCode::OK, Json(response))
}
