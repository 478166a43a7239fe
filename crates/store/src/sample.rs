//! Demo dataset: an optional CSV read once at startup, with a built-in
//! fallback matching the sample sheet the dashboard ships with.

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use sitepulse_core::columns;
use sitepulse_core::job::{JobDraft, JobStatus};
use sitepulse_core::normalize;

use crate::memory::InMemoryWorksheet;

/// Load the sample dataset from `path`, falling back to the built-in rows
/// when the file is absent or yields nothing usable.
///
/// CSV columns: `Project` (optional), `Job Name`, `Start Date`, `End Date`,
/// `Estimated Cost`, `Estimated Duration` (optional), matched by header
/// name. Rows failing required-field coercion are skipped, same as
/// worksheet normalization.
pub fn load_sample_data(path: &Path) -> Vec<JobDraft> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let drafts = parse_csv(&text);
            if drafts.is_empty() {
                tracing::warn!(path = %path.display(), "Sample CSV had no usable rows, using built-in dataset");
                builtin_dataset()
            } else {
                tracing::info!(path = %path.display(), rows = drafts.len(), "Loaded sample dataset from CSV");
                drafts
            }
        }
        Err(_) => {
            tracing::info!(path = %path.display(), "No sample CSV found, using built-in dataset");
            builtin_dataset()
        }
    }
}

/// Parse the sample CSV. Quote-aware: a quoted field may contain commas
/// and doubled quotes.
pub fn parse_csv(text: &str) -> Vec<JobDraft> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let header: Vec<String> = split_csv_line(header_line);

    lines
        .filter_map(|line| {
            let row = split_csv_line(line);
            draft_from_row(&header, &row)
        })
        .collect()
}

fn draft_from_row(header: &[String], row: &[String]) -> Option<JobDraft> {
    // The CSV shares the worksheet's column vocabulary, so row coercion is
    // the normalizer's; drafts drop the id a record would carry.
    let record = normalize::record_from_row(header, row)?;
    Some(JobDraft {
        name: record.name,
        start_date: record.start_date,
        end_date: record.end_date,
        estimated_cost: record.estimated_cost,
        estimated_duration: record.estimated_duration,
        status: record.status,
        project: record.project,
    })
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

/// The fixed 15-job demo dataset: six projects across calendar year 2024.
pub fn builtin_dataset() -> Vec<JobDraft> {
    const ROWS: [(&str, &str, &str, &str, f64); 15] = [
        ("Downtown Office Building", "Foundation Work", "2024-01-15", "2024-02-28", 50000.0),
        ("Downtown Office Building", "Site Preparation", "2024-01-01", "2024-01-14", 15000.0),
        ("Residential Complex A", "Framing", "2024-03-01", "2024-04-15", 75000.0),
        ("Residential Complex A", "Roofing", "2024-04-10", "2024-05-05", 45000.0),
        ("Residential Complex A", "Electrical Installation", "2024-04-01", "2024-05-15", 30000.0),
        ("Residential Complex A", "Plumbing", "2024-04-15", "2024-05-30", 25000.0),
        ("Shopping Center Renovation", "HVAC Installation", "2024-05-01", "2024-06-10", 40000.0),
        ("Shopping Center Renovation", "Insulation", "2024-05-15", "2024-06-05", 18000.0),
        ("Shopping Center Renovation", "Drywall", "2024-05-01", "2024-06-15", 35000.0),
        ("Warehouse Expansion", "Flooring", "2024-06-10", "2024-07-20", 28000.0),
        ("Warehouse Expansion", "Interior Painting", "2024-07-01", "2024-08-15", 22000.0),
        ("Modern Family Home", "Kitchen Installation", "2024-07-15", "2024-08-30", 55000.0),
        ("Modern Family Home", "Bathroom Installation", "2024-08-01", "2024-09-15", 35000.0),
        ("Modern Family Home", "Final Inspections", "2024-09-10", "2024-09-20", 5000.0),
        ("City Park Pavilion", "Landscaping", "2024-09-15", "2024-10-15", 20000.0),
    ];

    ROWS.iter()
        .map(|(project, name, start, end, cost)| JobDraft {
            name: name.to_string(),
            start_date: start.parse().expect("built-in dataset date"),
            end_date: end.parse().expect("built-in dataset date"),
            estimated_cost: *cost,
            estimated_duration: None,
            status: JobStatus::Planned,
            project: Some(project.to_string()),
        })
        .collect()
}

/// Build an in-memory worksheet seeded with the given drafts, each row
/// getting a fresh id so it is addressable for edit and delete.
pub async fn seeded_worksheet(address: &str, drafts: Vec<JobDraft>) -> InMemoryWorksheet {
    let header = columns::canonical_header(true);
    let mut grid = vec![header.clone()];
    for draft in drafts {
        let record = draft.into_record(Uuid::new_v4());
        grid.push(
            header
                .iter()
                .map(|column| match column.as_str() {
                    columns::JOB_NAME => record.name.clone(),
                    columns::START_DATE => record.start_date.to_string(),
                    columns::END_DATE => record.end_date.to_string(),
                    columns::ESTIMATED_COST => format!("{:.0}", record.estimated_cost),
                    columns::ESTIMATED_DURATION => record
                        .estimated_duration
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                    columns::STATUS => record.status.as_str().to_string(),
                    columns::PROJECT => record.project.clone().unwrap_or_default(),
                    columns::JOB_ID => record.id.map(|id| id.to_string()).unwrap_or_default(),
                    _ => String::new(),
                })
                .collect(),
        );
    }
    InMemoryWorksheet::with_grid(address, grid)
}
