//! Job CRUD handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use sitepulse_core::analytics;
use sitepulse_core::job::{JobDraft, JobRecord, JobStatus};
use sitepulse_core::validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListJobsParams {
    /// Case-insensitive name-contains search.
    pub search: Option<String>,
    /// Exact status label, e.g. `In Progress`.
    pub status: Option<String>,
}

/// GET /api/v1/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsParams>,
) -> AppResult<Json<DataResponse<Vec<JobRecord>>>> {
    let status = match params.status.as_deref() {
        Some(raw) => Some(JobStatus::parse_strict(raw).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown status '{raw}'"))
        })?),
        None => None,
    };

    let table = state.store.load().await?;
    let jobs = analytics::filter_jobs(&table, params.search.as_deref(), status)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DataResponse::new(jobs)))
}

/// POST /api/v1/jobs
pub async fn create_job(
    State(state): State<AppState>,
    Json(draft): Json<JobDraft>,
) -> AppResult<(StatusCode, Json<DataResponse<JobRecord>>)> {
    let violations = validate::validate_draft(&draft);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let record = state.store.append(draft).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
}

/// Update payload: the draft to write plus the snapshot the client loaded,
/// so a row changed underneath them fails with 409 instead of silently
/// clobbering the concurrent edit.
#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub expected: JobRecord,
    pub draft: JobDraft,
}

/// PUT /api/v1/jobs/{id}
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> AppResult<Json<DataResponse<JobRecord>>> {
    let violations = validate::validate_draft(&request.draft);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let record = state.store.update(id, &request.expected, request.draft).await?;
    Ok(Json(DataResponse::new(record)))
}

/// DELETE /api/v1/jobs/{id}
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
