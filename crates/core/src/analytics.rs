//! Budget analytics: filters, spend aggregation, and KPI derivation.
//!
//! Every function here is evaluated fresh per request from the normalized
//! table plus filter parameters and session state.

use std::collections::BTreeMap;
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::calendar::MonthWindow;
use crate::job::{JobRecord, JobStatus};

// ---------------------------------------------------------------------------
// Color-threshold policy
// ---------------------------------------------------------------------------

/// Budget-used percentage at or above which the KPI shows as Danger.
pub const USED_DANGER_PCT: f64 = 90.0;
/// Budget-used percentage at or above which the KPI shows as Caution.
pub const USED_CAUTION_PCT: f64 = 70.0;
/// Remaining percentage at or below which the KPI shows as Danger.
pub const REMAINING_DANGER_PCT: f64 = 10.0;
/// Remaining percentage at or below which the KPI shows as Caution.
pub const REMAINING_CAUTION_PCT: f64 = 30.0;

/// Traffic-light band for a budget KPI. Thresholds are fixed policy,
/// not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetBand {
    Safe,
    Caution,
    Danger,
}

impl BudgetBand {
    /// CSS color the dashboard renders the KPI caption with.
    pub fn css_color(self) -> &'static str {
        match self {
            Self::Safe => "green",
            Self::Caution => "orange",
            Self::Danger => "red",
        }
    }
}

/// Band for the budget-used percentage. Upper bands are inclusive:
/// exactly 90 is Danger, exactly 70 is Caution.
pub fn used_band(used_pct: f64) -> BudgetBand {
    if used_pct >= USED_DANGER_PCT {
        BudgetBand::Danger
    } else if used_pct >= USED_CAUTION_PCT {
        BudgetBand::Caution
    } else {
        BudgetBand::Safe
    }
}

/// Band for the remaining percentage, inverse logic: 10% or less left is
/// Danger, 30% or less is Caution.
pub fn remaining_band(remaining_pct: f64) -> BudgetBand {
    if remaining_pct <= REMAINING_DANGER_PCT {
        BudgetBand::Danger
    } else if remaining_pct <= REMAINING_CAUTION_PCT {
        BudgetBand::Caution
    } else {
        BudgetBand::Safe
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Jobs whose schedule touches the month window, in table order.
pub fn jobs_in_window<'a>(jobs: &'a [JobRecord], window: &MonthWindow) -> Vec<&'a JobRecord> {
    jobs.iter()
        .filter(|j| window.overlaps(j.start_date, j.end_date))
        .collect()
}

/// Jobs starting inside the window (not merely overlapping it), in table
/// order. This is the population for "this month" KPIs and the spend chart.
pub fn jobs_starting_in_window<'a>(
    jobs: &'a [JobRecord],
    window: &MonthWindow,
) -> Vec<&'a JobRecord> {
    jobs.iter()
        .filter(|j| window.contains(j.start_date))
        .collect()
}

/// Exact-match project filter. No overlap semantics here.
pub fn jobs_in_project<'a>(jobs: &'a [JobRecord], project: &str) -> Vec<&'a JobRecord> {
    jobs.iter()
        .filter(|j| j.project.as_deref() == Some(project))
        .collect()
}

/// Job-management list filter: case-insensitive name-contains search plus
/// exact status match. Either filter may be absent.
pub fn filter_jobs<'a>(
    jobs: &'a [JobRecord],
    search: Option<&str>,
    status: Option<JobStatus>,
) -> Vec<&'a JobRecord> {
    let needle = search.map(str::to_lowercase);
    jobs.iter()
        .filter(|j| match &needle {
            Some(n) => j.name.to_lowercase().contains(n),
            None => true,
        })
        .filter(|j| match status {
            Some(s) => j.status == s,
            None => true,
        })
        .collect()
}

/// Distinct project names present in the table, sorted. Rows without a
/// project are skipped.
pub fn project_names(jobs: &[JobRecord]) -> Vec<String> {
    let mut names: Vec<String> = jobs
        .iter()
        .filter_map(|j| j.project.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// Spend aggregation
// ---------------------------------------------------------------------------

/// Spend attributed to one start date, with the running total through it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SpendPoint {
    pub date: NaiveDate,
    pub spend: f64,
    pub cumulative: f64,
}

/// Group jobs by start date, sum cost per date, and carry a cumulative sum
/// in date-ascending order. Same-date costs accumulate in the order the
/// rows appear in the table.
pub fn daily_spend(jobs: &[&JobRecord]) -> Vec<SpendPoint> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for job in jobs {
        *by_date.entry(job.start_date).or_insert(0.0) += job.estimated_cost;
    }

    let mut cumulative = 0.0;
    by_date
        .into_iter()
        .map(|(date, spend)| {
            cumulative += spend;
            SpendPoint {
                date,
                spend,
                cumulative,
            }
        })
        .collect()
}

/// Total estimated cost of every job starting on or before `through`.
///
/// Note this scans the whole table, not a window: "spend to date" is
/// independent of any displayed window's lower bound.
pub fn spend_to_date(jobs: &[JobRecord], through: NaiveDate) -> f64 {
    jobs.iter()
        .filter(|j| j.start_date <= through)
        .map(|j| j.estimated_cost)
        .sum()
}

/// Percentage of budget consumed by `spend`.
///
/// A non-positive budget reports 0% by convention; budget entry is rejected
/// at the API boundary, so this only covers defensively-computed views.
pub fn budget_used_pct(spend: f64, budget: f64) -> f64 {
    if budget <= 0.0 {
        return 0.0;
    }
    spend / budget * 100.0
}

// ---------------------------------------------------------------------------
// KPI derivation
// ---------------------------------------------------------------------------

/// KPI cards for the windowed-by-month dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MonthKpis {
    pub total_spend_to_date: f64,
    pub budget_used_pct: f64,
    pub used_band: BudgetBand,
    /// `budget - spend`; may go negative, never clamped.
    pub remaining_budget: f64,
    pub remaining_pct: f64,
    pub remaining_band: BudgetBand,
    pub jobs_this_month: usize,
    pub spend_this_month: f64,
}

pub fn month_kpis(jobs: &[JobRecord], window: &MonthWindow, budget: f64) -> MonthKpis {
    let starting = jobs_starting_in_window(jobs, window);
    let spend_this_month = starting.iter().map(|j| j.estimated_cost).sum();

    let total_spend_to_date = spend_to_date(jobs, window.end);
    let used_pct = budget_used_pct(total_spend_to_date, budget);
    let remaining_pct = 100.0 - used_pct;

    MonthKpis {
        total_spend_to_date,
        budget_used_pct: used_pct,
        used_band: used_band(used_pct),
        remaining_budget: budget - total_spend_to_date,
        remaining_pct,
        remaining_band: remaining_band(remaining_pct),
        jobs_this_month: starting.len(),
        spend_this_month,
    }
}

/// KPI cards for the grouped-by-project dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProjectKpis {
    pub total_spend_to_date: f64,
    pub budget_used_pct: f64,
    pub used_band: BudgetBand,
    pub remaining_budget: f64,
    pub remaining_pct: f64,
    pub remaining_band: BudgetBand,
    pub jobs_complete: usize,
    pub jobs_in_progress: usize,
}

/// Derive project KPIs. `completed` is the session's completion set of
/// [`JobRecord::key`] values; it is independent of each record's status.
pub fn project_kpis(
    jobs: &[JobRecord],
    project: &str,
    budget: f64,
    completed: &HashSet<String>,
) -> ProjectKpis {
    let project_jobs = jobs_in_project(jobs, project);
    let spend: f64 = project_jobs.iter().map(|j| j.estimated_cost).sum();

    let jobs_complete = project_jobs
        .iter()
        .filter(|j| completed.contains(&j.key()))
        .count();

    let used_pct = budget_used_pct(spend, budget);
    let remaining_pct = 100.0 - used_pct;

    ProjectKpis {
        total_spend_to_date: spend,
        budget_used_pct: used_pct,
        used_band: used_band(used_pct),
        remaining_budget: budget - spend,
        remaining_pct,
        remaining_band: remaining_band(remaining_pct),
        jobs_complete,
        jobs_in_progress: project_jobs.len() - jobs_complete,
    }
}
