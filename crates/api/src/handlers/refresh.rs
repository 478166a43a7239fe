use axum::extract::State;
use axum::http::StatusCode;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/refresh
///
/// Drops the read cache so the next load hits the worksheet, regardless of
/// remaining TTL.
pub async fn refresh(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.store.refresh().await;
    tracing::info!("Read cache invalidated by request");
    Ok(StatusCode::NO_CONTENT)
}
