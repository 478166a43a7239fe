use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sitepulse_store::{GoogleSheetsWorksheet, JobStore, Worksheet};

use sitepulse_api::config::{ServerConfig, ViewMode};
use sitepulse_api::router::build_app_router;
use sitepulse_api::sessions::SessionRegistry;
use sitepulse_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present (development convenience).
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitepulse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        view_mode = config.view_mode.as_str(),
        cache_ttl_secs = config.cache_ttl_secs,
        "Starting SitePulse API"
    );

    let worksheet = build_worksheet(&config).await;
    tracing::info!(address = %worksheet.address(), "Worksheet backend ready");

    let store = JobStore::new(
        worksheet,
        Duration::from_secs(config.cache_ttl_secs),
        config.view_mode == ViewMode::Project,
    );

    let state = AppState {
        store: Arc::new(store),
        sessions: Arc::new(SessionRegistry::new()),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout_secs))
        .await
        .expect("Server error");
}

/// Pick the worksheet backend: Google Sheets when `SHEET_URL` is set, the
/// sample-data in-memory worksheet otherwise. Misconfiguration fails fast.
async fn build_worksheet(config: &ServerConfig) -> Arc<dyn Worksheet> {
    let include_project = config.view_mode == ViewMode::Project;

    match &config.sheet_url {
        Some(url) => {
            let worksheet = GoogleSheetsWorksheet::from_url(url, include_project)
                .unwrap_or_else(|e| panic!("SHEET_URL rejected: {e}"));
            Arc::new(worksheet)
        }
        None => {
            let drafts =
                sitepulse_store::sample::load_sample_data(Path::new(&config.sample_data_path));
            tracing::info!(
                jobs = drafts.len(),
                path = %config.sample_data_path,
                "No SHEET_URL set; serving sample data from memory"
            );
            Arc::new(sitepulse_store::sample::seeded_worksheet("mem://sample", drafts).await)
        }
    }
}

/// Resolve when the process receives SIGINT or SIGTERM, giving in-flight
/// requests up to the drain timeout to finish.
async fn shutdown_signal(drain_secs: u64) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!(drain_secs, "Shutdown signal received, draining");
}
