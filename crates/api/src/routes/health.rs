use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness probe. Reports which backend and view mode the server came up
/// with; it does not touch the worksheet.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let store = if state.config.sheet_url.is_some() {
        "google-sheets"
    } else {
        "memory"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "store": store,
        "view_mode": state.config.view_mode.as_str(),
    }))
}
