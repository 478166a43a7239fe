//! Write-side validation.
//!
//! Every violation in a submission is reported individually, and a single
//! violation blocks the whole write -- there are no partial writes. These
//! checks gate input only; rows already in the sheet pass through unchecked.

use crate::job::JobDraft;

/// One validation failure, tied to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: &'static str,
}

impl Violation {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validate a job submission. Empty vec means the draft may be written.
pub fn validate_draft(draft: &JobDraft) -> Vec<Violation> {
    let mut violations = Vec::new();

    if draft.name.trim().is_empty() {
        violations.push(Violation::new("name", "Job name is required"));
    }
    if draft.start_date >= draft.end_date {
        violations.push(Violation::new(
            "end_date",
            "End date must be after start date",
        ));
    }
    if !(draft.estimated_cost >= 0.0) || !draft.estimated_cost.is_finite() {
        violations.push(Violation::new(
            "estimated_cost",
            "Estimated cost must be non-negative",
        ));
    }
    if draft.estimated_duration == Some(0) {
        violations.push(Violation::new(
            "estimated_duration",
            "Estimated duration must be positive",
        ));
    }

    violations
}

/// Validate a budget entry. Zero and negative budgets are rejected here so
/// downstream percentage math never divides by a configured zero.
pub fn validate_budget(amount: f64) -> Vec<Violation> {
    if amount.is_finite() && amount > 0.0 {
        Vec::new()
    } else {
        vec![Violation::new("amount", "Budget must be a positive amount")]
    }
}

/// Validate a new project name against the merged picker list.
pub fn validate_project_name(name: &str, existing: &[String]) -> Vec<Violation> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return vec![Violation::new("name", "Project name is required")];
    }
    if existing.iter().any(|p| p == trimmed) {
        return vec![Violation::new("name", "Project already exists")];
    }
    Vec::new()
}
