use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::facts::schema::KEY_COUNT;
use crate::state::AppState;

/// GET /health
/// Service version plus the schema size and extraction model in use.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "factsheet-api",
        "schema_keys": KEY_COUNT,
        "model": state.config.anthropic_model,
    }))
}
