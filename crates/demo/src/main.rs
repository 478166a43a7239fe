//! Headless demo: seeds the in-memory store with the sample dataset and
//! walks the analytics the dashboard renders, logging the results.
//!
//! Useful for eyeballing the numbers without a browser:
//!
//! ```text
//! cargo run -p sitepulse-demo
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sitepulse_core::{analytics, calendar::MonthWindow, charts};
use sitepulse_store::{sample, JobStore, Worksheet};

const DEMO_BUDGET: f64 = 500_000.0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitepulse_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let sample_path =
        std::env::var("SAMPLE_DATA_PATH").unwrap_or_else(|_| "sample_data.csv".into());
    let drafts = sample::load_sample_data(Path::new(&sample_path));

    let worksheet = Arc::new(sample::seeded_worksheet("mem://demo", drafts).await);
    let store = JobStore::new(
        worksheet.clone() as Arc<dyn Worksheet>,
        Duration::from_secs(300),
        false,
    );
    let table = store.load().await.context("loading the sample table")?;

    let total_cost: f64 = table.iter().map(|j| j.estimated_cost).sum();
    tracing::info!(
        jobs = table.len(),
        projects = analytics::project_names(&table).len(),
        total_cost,
        "Dataset loaded"
    );

    // January window: schedule and starters.
    let january = MonthWindow::new(2024, 1).context("building the January window")?;
    let timeline = charts::timeline_chart(&table, &january);
    tracing::info!(title = %timeline.title, bars = timeline.bars.len(), "Month schedule");
    for bar in &timeline.bars {
        tracing::info!(
            name = %bar.name,
            start = %bar.start_date,
            end = %bar.end_date,
            cost = bar.estimated_cost,
            status = %bar.status,
            "  job"
        );
    }

    // March budget analysis against the demo budget.
    let march = MonthWindow::new(2024, 3).context("building the March window")?;
    let kpis = analytics::month_kpis(&table, &march, DEMO_BUDGET);
    tracing::info!(
        window = %march.label(),
        budget = DEMO_BUDGET,
        spend_to_date = kpis.total_spend_to_date,
        used_pct = kpis.budget_used_pct,
        used_band = ?kpis.used_band,
        remaining = kpis.remaining_budget,
        jobs_this_month = kpis.jobs_this_month,
        "Budget analysis"
    );

    // Per-project breakdown.
    let completed = HashSet::new();
    for project in analytics::project_names(&table) {
        let pie = charts::budget_pie(&table, &project, DEMO_BUDGET, &completed);
        tracing::info!(
            project = %project,
            jobs = analytics::jobs_in_project(&table, &project).len(),
            total_cost = pie.total_job_cost,
            used_pct = pie.budget_used_pct,
            "Project breakdown"
        );
    }

    Ok(())
}
