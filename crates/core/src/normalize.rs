//! Raw worksheet grid -> typed job table.
//!
//! The worksheet hands back text cells keyed by position; the header row
//! maps positions to column names. Normalization coerces each data row into
//! a [`JobRecord`], dropping rows whose required fields fail coercion.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::columns;
use crate::job::{JobRecord, JobStatus};

/// Canonical worksheet date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Lenient fallback for sheets edited by hand in US locale.
const DATE_FORMAT_LENIENT: &str = "%m/%d/%Y";

/// Result of normalizing a grid: the surviving records plus how many rows
/// were dropped for failed coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOutcome {
    pub records: Vec<JobRecord>,
    pub dropped: usize,
}

/// Normalize a full grid (header row first). Rows are kept in sheet order.
///
/// A row is dropped when `start_date`, `end_date`, or `estimated_cost` is
/// missing or unparsable. An unparsable duration or id degrades to `None`
/// and the row survives; an empty status becomes `Planned`.
pub fn normalize_grid(grid: &[Vec<String>]) -> NormalizeOutcome {
    let Some((header, rows)) = grid.split_first() else {
        return NormalizeOutcome {
            records: Vec::new(),
            dropped: 0,
        };
    };

    let mut records = Vec::with_capacity(rows.len());
    let mut dropped = 0;
    for row in rows {
        match record_from_row(header, row) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }
    NormalizeOutcome { records, dropped }
}

/// Coerce one data row against the header. `None` means the row fails
/// required-field coercion and must be dropped.
pub fn record_from_row(header: &[String], row: &[String]) -> Option<JobRecord> {
    let cell = |name: &str| -> Option<&str> {
        let idx = header.iter().position(|h| h == name)?;
        row.get(idx).map(String::as_str)
    };

    let start_date = parse_date(cell(columns::START_DATE)?)?;
    let end_date = parse_date(cell(columns::END_DATE)?)?;
    let estimated_cost = parse_cost(cell(columns::ESTIMATED_COST)?)?;

    let name = cell(columns::JOB_NAME).unwrap_or_default().trim().to_string();
    let estimated_duration = cell(columns::ESTIMATED_DURATION).and_then(parse_duration);
    let status = JobStatus::parse_or_planned(cell(columns::STATUS).unwrap_or_default());

    let project = cell(columns::PROJECT)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    let id = cell(columns::JOB_ID).and_then(|raw| Uuid::parse_str(raw.trim()).ok());

    Some(JobRecord {
        id,
        name,
        start_date,
        end_date,
        estimated_cost,
        estimated_duration,
        status,
        project,
    })
}

/// Parse a worksheet date cell, canonical format first, lenient fallback
/// second.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_FORMAT_LENIENT))
        .ok()
}

/// Parse a cost cell. Tolerates currency noise (`$`, thousands separators)
/// since sheets edited by hand accumulate it.
pub fn parse_cost(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|c| c.is_finite())
}

fn parse_duration(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|d| *d > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        columns::canonical_header(true)
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn normalizes_a_well_formed_row() {
        let grid = vec![
            header(),
            // Job Name, Start, End, Cost, Duration, Status, Project, Job ID
            row(&[
                "Foundation Work",
                "2024-01-15",
                "2024-02-28",
                "50000",
                "44",
                "In Progress",
                "Downtown Office Building",
                "7b02214e-3da7-4e1a-a2e0-01697fbcba3c",
            ]),
        ];
        let outcome = normalize_grid(&grid);
        assert_eq!(outcome.dropped, 0);
        let rec = &outcome.records[0];
        assert_eq!(rec.name, "Foundation Work");
        assert_eq!(rec.status, JobStatus::InProgress);
        assert_eq!(rec.estimated_duration, Some(44));
        assert_eq!(rec.project.as_deref(), Some("Downtown Office Building"));
        assert!(rec.id.is_some());
    }

    #[test]
    fn drops_rows_with_unparsable_date_or_cost() {
        let grid = vec![
            header(),
            row(&["Bad Date", "not-a-date", "2024-02-28", "50000", "", "", "", ""]),
            row(&["Bad Cost", "2024-01-15", "2024-02-28", "lots", "", "", "", ""]),
            row(&["Good", "2024-01-15", "2024-02-28", "50000", "", "", "", ""]),
        ];
        let outcome = normalize_grid(&grid);
        assert_eq!(outcome.dropped, 2);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].name, "Good");
    }

    #[test]
    fn empty_status_becomes_planned() {
        let grid = vec![
            header(),
            row(&["Job", "2024-01-15", "2024-02-28", "50000", "", "", "", ""]),
        ];
        let outcome = normalize_grid(&grid);
        assert_eq!(outcome.records[0].status, JobStatus::Planned);
    }

    #[test]
    fn unparsable_duration_and_id_degrade_to_none() {
        let grid = vec![
            header(),
            row(&["Job", "2024-01-15", "2024-02-28", "50000", "soon", "", "", "not-a-uuid"]),
        ];
        let outcome = normalize_grid(&grid);
        assert_eq!(outcome.dropped, 0);
        let rec = &outcome.records[0];
        assert_eq!(rec.estimated_duration, None);
        assert_eq!(rec.id, None);
    }

    #[test]
    fn short_rows_treat_missing_cells_as_empty() {
        // Sheets drop trailing empty cells from fetched rows.
        let grid = vec![
            header(),
            row(&["Job", "2024-01-15", "2024-02-28", "50000"]),
        ];
        let outcome = normalize_grid(&grid);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].status, JobStatus::Planned);
        assert_eq!(outcome.records[0].project, None);
    }

    #[test]
    fn lenient_date_and_currency_noise_are_tolerated() {
        let grid = vec![
            header(),
            row(&["Job", "01/15/2024", "2024-02-28", "$50,000", "", "", "", ""]),
        ];
        let outcome = normalize_grid(&grid);
        let rec = &outcome.records[0];
        assert_eq!(rec.start_date, "2024-01-15".parse().unwrap());
        assert_eq!(rec.estimated_cost, 50000.0);
    }

    #[test]
    fn header_only_grid_yields_empty_table() {
        let outcome = normalize_grid(&[header()]);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.dropped, 0);
    }

    #[test]
    fn empty_grid_yields_empty_table() {
        let outcome = normalize_grid(&[]);
        assert!(outcome.records.is_empty());
    }
}
