use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;
use crate::store::CredentialStore;

/// GET /health - liveness plus a key store round trip
///
/// Store failure detail is logged, never returned.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "store": "ok",
                "timestamp": now,
            })),
        ),
        Err(e) => {
            tracing::error!("Key store health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "store": "unavailable",
                    "timestamp": now,
                })),
            )
        }
    }
}
