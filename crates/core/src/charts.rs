//! Chart view models: plain data the browser's chart library renders.
//!
//! Nothing here draws anything. Each builder turns the normalized table and
//! filter parameters into labeled, colored series for the frontend.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::analytics::{self, SpendPoint};
use crate::calendar::MonthWindow;
use crate::job::{JobRecord, JobStatus};

/// Qualitative 12-color palette cycled for pie slices by row index.
pub const PALETTE: [&str; 12] = [
    "#8DD3C7", "#FFFFB3", "#BEBADA", "#FB8072", "#80B1D3", "#FDB462", "#B3DE69", "#FCCDE5",
    "#D9D9D9", "#BC80BD", "#CCEBC5", "#FFED6F",
];

/// Slice color for jobs marked complete in the session.
pub const COMPLETED_SLICE_COLOR: &str = "#90EE90";
/// Slice color for the remaining-budget slice.
pub const REMAINING_SLICE_COLOR: &str = "#E8E8E8";
/// Label for the remaining-budget slice.
pub const REMAINING_SLICE_LABEL: &str = "Remaining Budget";

// ---------------------------------------------------------------------------
// Timeline (month mode)
// ---------------------------------------------------------------------------

/// One horizontal bar on the month timeline.
///
/// `display_start`/`display_end` are clipped to the window; `start_date` and
/// `end_date` are the record's true dates for the hover card.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TimelineBar {
    pub name: String,
    pub display_start: NaiveDate,
    pub display_end: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub estimated_cost: f64,
    pub estimated_duration: Option<u32>,
    pub status: JobStatus,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TimelineChart {
    pub title: String,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub bars: Vec<TimelineBar>,
}

/// Build the month timeline: one bar per window-overlapping job, colored by
/// status, clipped to the window for display.
pub fn timeline_chart(jobs: &[JobRecord], window: &MonthWindow) -> TimelineChart {
    let bars = analytics::jobs_in_window(jobs, window)
        .into_iter()
        .map(|job| {
            let (display_start, display_end) = window.clip(job.start_date, job.end_date);
            TimelineBar {
                name: job.name.clone(),
                display_start,
                display_end,
                start_date: job.start_date,
                end_date: job.end_date,
                estimated_cost: job.estimated_cost,
                estimated_duration: job.estimated_duration,
                status: job.status,
                color: job.status.color(),
            }
        })
        .collect();

    TimelineChart {
        title: format!("Job Schedule - {}", window.label()),
        window_start: window.start,
        window_end: window.end,
        bars,
    }
}

// ---------------------------------------------------------------------------
// Spend (both modes)
// ---------------------------------------------------------------------------

/// Per-start-date spend bars with the cumulative line.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SpendChart {
    pub title: String,
    pub points: Vec<SpendPoint>,
}

/// Build the daily-spend chart over an already-filtered job set (the month's
/// starters, or a project's jobs). `subject` names the filter in the title.
pub fn spend_chart(jobs: &[&JobRecord], subject: &str) -> SpendChart {
    SpendChart {
        title: format!("Daily Job Starts & Spend - {subject}"),
        points: analytics::daily_spend(jobs),
    }
}

// ---------------------------------------------------------------------------
// Budget pie (project mode)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
    pub pct_of_budget: f64,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BudgetPie {
    pub title: String,
    pub slices: Vec<PieSlice>,
    pub total_job_cost: f64,
    pub budget: f64,
    pub budget_used_pct: f64,
}

/// Build the project budget pie: one slice per job at its cost, plus a
/// remaining-budget slice when the budget is not yet exhausted.
///
/// Completed jobs (per the session's completion set) take the fixed
/// completed color; the rest cycle the palette by row index.
pub fn budget_pie(
    jobs: &[JobRecord],
    project: &str,
    budget: f64,
    completed: &HashSet<String>,
) -> BudgetPie {
    let project_jobs = analytics::jobs_in_project(jobs, project);
    let total_job_cost: f64 = project_jobs.iter().map(|j| j.estimated_cost).sum();

    let mut slices: Vec<PieSlice> = project_jobs
        .iter()
        .enumerate()
        .map(|(i, job)| {
            let is_completed = completed.contains(&job.key());
            PieSlice {
                label: job.name.clone(),
                value: job.estimated_cost,
                color: if is_completed {
                    COMPLETED_SLICE_COLOR
                } else {
                    PALETTE[i % PALETTE.len()]
                },
                pct_of_budget: analytics::budget_used_pct(job.estimated_cost, budget),
                completed: is_completed,
            }
        })
        .collect();

    // Remaining-budget slice, omitted entirely once the budget is spent.
    let remaining = budget - total_job_cost;
    if remaining > 0.0 {
        slices.push(PieSlice {
            label: REMAINING_SLICE_LABEL.to_string(),
            value: remaining,
            color: REMAINING_SLICE_COLOR,
            pct_of_budget: analytics::budget_used_pct(remaining, budget),
            completed: false,
        });
    }

    BudgetPie {
        title: format!("Project Budget Breakdown - {project}"),
        slices,
        total_job_cost,
        budget,
        budget_used_pct: analytics::budget_used_pct(total_job_cost, budget),
    }
}
