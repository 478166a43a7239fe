//! Session-state handlers: budgets and completion marks.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use sitepulse_core::session::SessionContext;
use sitepulse_core::validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::sessions::require_session_id;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    /// `None` sets the month view's global budget; `Some` sets a per-project
    /// ceiling.
    pub project: Option<String>,
    pub amount: f64,
}

/// PUT /api/v1/session/budget
pub async fn set_budget(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SetBudgetRequest>,
) -> AppResult<Json<DataResponse<SessionContext>>> {
    let id = require_session_id(&headers)?;

    let violations = validate::validate_budget(request.amount);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let ctx = state
        .sessions
        .update(id, |ctx| {
            match request.project {
                Some(project) => {
                    ctx.project_budgets.insert(project, request.amount);
                }
                None => ctx.global_budget = Some(request.amount),
            }
            ctx.clone()
        })
        .await;
    Ok(Json(DataResponse::new(ctx)))
}

#[derive(Debug, Deserialize)]
pub struct SetCompletionRequest {
    /// A [`sitepulse_core::job::JobRecord::key`] value.
    pub key: String,
    pub completed: bool,
}

/// PUT /api/v1/session/completions
pub async fn set_completion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SetCompletionRequest>,
) -> AppResult<Json<DataResponse<SessionContext>>> {
    let id = require_session_id(&headers)?;

    let ctx = state
        .sessions
        .update(id, |ctx| {
            ctx.set_completion(request.key, request.completed);
            ctx.clone()
        })
        .await;
    Ok(Json(DataResponse::new(ctx)))
}
