//! Per-session ephemeral state.
//!
//! Budgets, completion marks, and custom project names live only for the
//! session that set them. They are never written to the worksheet and start
//! empty for every new session.

use std::collections::{HashMap, HashSet};

/// Budget used when neither the session nor the environment configures one.
pub const DEFAULT_BUDGET: f64 = 1_000_000.0;

/// Everything one session has set: its budgets, which jobs it marked
/// complete, and project names it added that are not (yet) in the sheet.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SessionContext {
    /// Budget for the windowed-by-month view.
    pub global_budget: Option<f64>,
    /// Per-project ceilings for the grouped-by-project view.
    pub project_budgets: HashMap<String, f64>,
    /// Completion set of [`crate::job::JobRecord::key`] values.
    pub completed: HashSet<String>,
    /// Projects added through the add-project form, merged into the picker.
    pub custom_projects: Vec<String>,
}

impl SessionContext {
    /// Resolve the budget for a view. `project` is `None` in month mode.
    pub fn budget_for(&self, project: Option<&str>, default: f64) -> f64 {
        match project {
            Some(p) => self.project_budgets.get(p).copied().unwrap_or(default),
            None => self.global_budget.unwrap_or(default),
        }
    }

    /// Mark or unmark one job key complete.
    pub fn set_completion(&mut self, key: String, completed: bool) {
        if completed {
            self.completed.insert(key);
        } else {
            self.completed.remove(&key);
        }
    }
}
