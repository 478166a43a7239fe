//! Project picker handlers.
//!
//! The picker merges project names found in the table with names the session
//! added through the add-project form. Added names are session state only;
//! they reach the sheet when the first job is filed under them.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use sitepulse_core::analytics;
use sitepulse_core::job::JobRecord;
use sitepulse_core::validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::sessions::{require_session_id, session_id};
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let ctx = state.sessions.snapshot(session_id(&headers)?).await;
    let table = state.store.load().await?;
    Ok(Json(DataResponse::new(merged_projects(&table, &ctx.custom_projects))))
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

/// POST /api/v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<String>>>)> {
    let id = require_session_id(&headers)?;
    let ctx = state.sessions.snapshot(Some(id)).await;
    let table = state.store.load().await?;

    let existing = merged_projects(&table, &ctx.custom_projects);
    let name = request.name.trim().to_string();
    let violations = validate::validate_project_name(&name, &existing);
    if violations.iter().any(|v| v.message == "Project already exists") {
        return Err(AppError::Conflict(format!("Project '{name}' already exists")));
    }
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let merged = state
        .sessions
        .update(id, |ctx| {
            ctx.custom_projects.push(name.clone());
            merged_projects(&table, &ctx.custom_projects)
        })
        .await;
    Ok((StatusCode::CREATED, Json(DataResponse::new(merged))))
}

/// Table projects plus the session's additions, sorted and deduplicated.
fn merged_projects(table: &[JobRecord], custom: &[String]) -> Vec<String> {
    let mut names = analytics::project_names(table);
    names.extend(custom.iter().cloned());
    names.sort();
    names.dedup();
    names
}
