use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Static liveness payload.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "AI Portfolio Builder API",
        "status": "running"
    }))
}
