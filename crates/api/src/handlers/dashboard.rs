//! Dashboard assembly: one endpoint whose shape follows the configured view
//! mode.
//!
//! Month mode windows the table by calendar month; project mode groups it by
//! the `Project` column. Session state (budgets, completion marks) comes from
//! the optional `x-session-id` header and only ever changes how the numbers
//! are presented, never what is stored.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use sitepulse_core::analytics::{self, MonthKpis, ProjectKpis};
use sitepulse_core::calendar::MonthWindow;
use sitepulse_core::charts::{self, BudgetPie, SpendChart, TimelineChart};
use sitepulse_core::job::JobRecord;
use sitepulse_core::session::SessionContext;

use crate::config::ViewMode;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::sessions::session_id;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub project: Option<String>,
}

/// The dashboard payload, tagged by view mode.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Dashboard {
    Month(MonthDashboard),
    Project(ProjectDashboard),
}

#[derive(Debug, Serialize)]
pub struct MonthDashboard {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub budget: f64,
    pub kpis: MonthKpis,
    pub timeline: TimelineChart,
    pub spend: SpendChart,
    pub jobs: Vec<JobRecord>,
    pub summary: TableSummary,
}

#[derive(Debug, Serialize)]
pub struct ProjectDashboard {
    pub project: String,
    pub budget: f64,
    pub kpis: ProjectKpis,
    pub pie: BudgetPie,
    pub spend: SpendChart,
    pub jobs: Vec<ProjectJobRow>,
    pub summary: TableSummary,
}

/// A project-view table row: the record plus its session completion overlay.
#[derive(Debug, Serialize)]
pub struct ProjectJobRow {
    #[serde(flatten)]
    pub record: JobRecord,
    pub key: String,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub job_count: usize,
    pub total_cost: f64,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DashboardParams>,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    let ctx = state.sessions.snapshot(session_id(&headers)?).await;
    let table = state.store.load().await?;

    let dashboard = match state.config.view_mode {
        ViewMode::Month => Dashboard::Month(month_dashboard(&table, &ctx, &state, &params)?),
        ViewMode::Project => {
            Dashboard::Project(project_dashboard(&table, &ctx, &state, &params)?)
        }
    };
    Ok(Json(DataResponse::new(dashboard)))
}

fn month_dashboard(
    table: &[JobRecord],
    ctx: &SessionContext,
    state: &AppState,
    params: &DashboardParams,
) -> AppResult<MonthDashboard> {
    let (Some(year), Some(month)) = (params.year, params.month) else {
        return Err(AppError::BadRequest(
            "year and month query parameters are required in month view".to_string(),
        ));
    };
    let window = MonthWindow::new(year, month)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month {year}-{month}")))?;

    let budget = ctx.budget_for(None, state.config.default_budget);
    let kpis = analytics::month_kpis(table, &window, budget);
    let timeline = charts::timeline_chart(table, &window);

    let starting = analytics::jobs_starting_in_window(table, &window);
    let spend = charts::spend_chart(&starting, &window.label());

    let jobs: Vec<JobRecord> = analytics::jobs_in_window(table, &window)
        .into_iter()
        .cloned()
        .collect();
    let summary = TableSummary {
        job_count: jobs.len(),
        total_cost: jobs.iter().map(|j| j.estimated_cost).sum(),
    };

    Ok(MonthDashboard {
        label: window.label(),
        year: window.year(),
        month: window.month(),
        budget,
        kpis,
        timeline,
        spend,
        jobs,
        summary,
    })
}

fn project_dashboard(
    table: &[JobRecord],
    ctx: &SessionContext,
    state: &AppState,
    params: &DashboardParams,
) -> AppResult<ProjectDashboard> {
    let Some(project) = params.project.as_deref() else {
        return Err(AppError::BadRequest(
            "project query parameter is required in project view".to_string(),
        ));
    };

    let budget = ctx.budget_for(Some(project), state.config.default_budget);
    let kpis = analytics::project_kpis(table, project, budget, &ctx.completed);
    let pie = charts::budget_pie(table, project, budget, &ctx.completed);

    let project_jobs = analytics::jobs_in_project(table, project);
    let spend = charts::spend_chart(&project_jobs, project);

    let jobs: Vec<ProjectJobRow> = project_jobs
        .into_iter()
        .map(|record| {
            let key = record.key();
            ProjectJobRow {
                completed: ctx.completed.contains(&key),
                key,
                record: record.clone(),
            }
        })
        .collect();
    let summary = TableSummary {
        job_count: jobs.len(),
        total_cost: jobs.iter().map(|j| j.record.estimated_cost).sum(),
    };

    Ok(ProjectDashboard {
        project: project.to_string(),
        budget,
        kpis,
        pie,
        spend,
        jobs,
        summary,
    })
}
