use axum::Json;
use serde_json::{json, Value};

/// GET /protected - fixed payload, useful for checking a key without sending data
pub async fn protected_resource() -> Json<Value> {
    Json(json!({
        "message": "This is a protected resource. You have successfully accessed it with a valid API key."
    }))
}
