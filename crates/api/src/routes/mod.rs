//! Route definitions, grouped by resource.

pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/jobs",
            get(handlers::jobs::list_jobs).post(handlers::jobs::create_job),
        )
        .route(
            "/jobs/{id}",
            put(handlers::jobs::update_job).delete(handlers::jobs::delete_job),
        )
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route("/session/budget", put(handlers::session::set_budget))
        .route(
            "/session/completions",
            put(handlers::session::set_completion),
        )
        .route("/refresh", post(handlers::refresh::refresh))
}
