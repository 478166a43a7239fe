use std::sync::Arc;

use sitepulse_store::JobStore;

use crate::config::ServerConfig;
use crate::sessions::SessionRegistry;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable: everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The job repository over the configured worksheet backend.
    pub store: Arc<JobStore>,
    /// Per-session budgets, completion marks, and custom projects.
    pub sessions: Arc<SessionRegistry>,
    /// Server configuration (view mode, default budget, timeouts).
    pub config: Arc<ServerConfig>,
}
