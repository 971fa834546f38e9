use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and current form-session usage.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "folio-api",
        "forms": {
            "active": state.sessions.len().await,
            "capacity": state.config.max_form_sessions
        },
        "export": state.exporter.backend()
    }))
}
