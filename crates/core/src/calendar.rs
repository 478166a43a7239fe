//! Calendar month windows for the windowed-by-month dashboard view.

use chrono::{Datelike, Days, Months, NaiveDate};

/// One calendar month, first day through last day inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Build the window for `(year, month)`. `None` for an out-of-range
    /// month or a year chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = start
            .checked_add_months(Months::new(1))?
            .checked_sub_days(Days::new(1))?;
        Some(Self { start, end })
    }

    /// Inclusive interval-overlap test against a job's schedule.
    ///
    /// A job belongs to every month its `[start, end]` span touches, so a
    /// job running Jan 15 .. Feb 28 shows up in both January and February.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Truncate a span to the window for display. The caller keeps the true
    /// dates; only the drawn bar is clipped.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
        (start.max(self.start), end.min(self.end))
    }

    /// Human label, e.g. `"January 2024"`.
    pub fn label(&self) -> String {
        self.start.format("%B %Y").to_string()
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }
}
