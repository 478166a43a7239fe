//! Canonical worksheet column names.
//!
//! The remote worksheet identifies columns by header text, not position.
//! These constants are the single source of truth for those names across
//! normalization, row serialization, and required-column validation.

/// Stable record identifier, written by the store on append.
///
/// Tolerated-absent when reading foreign sheets: rows without it load fine
/// but cannot be addressed for update or delete.
pub const JOB_ID: &str = "Job ID";
pub const JOB_NAME: &str = "Job Name";
pub const START_DATE: &str = "Start Date";
pub const END_DATE: &str = "End Date";
pub const ESTIMATED_COST: &str = "Estimated Cost";
pub const ESTIMATED_DURATION: &str = "Estimated Duration";
pub const STATUS: &str = "Status";
pub const PROJECT: &str = "Project";

/// Columns every sheet must carry to be usable at all.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    JOB_NAME,
    START_DATE,
    END_DATE,
    ESTIMATED_COST,
    ESTIMATED_DURATION,
    STATUS,
];

/// Header row written when the store creates a worksheet from scratch.
///
/// Always includes [`JOB_ID`] so records created through SitePulse are
/// id-addressable; includes [`PROJECT`] only in grouped-by-project mode.
pub fn canonical_header(include_project: bool) -> Vec<String> {
    let mut header: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
    if include_project {
        header.push(PROJECT.to_string());
    }
    header.push(JOB_ID.to_string());
    header
}

/// Required columns missing from `header`, in canonical order.
///
/// `require_project` adds [`PROJECT`] to the required set (grouped-by-project
/// mode cannot render without it). [`JOB_ID`] is never required.
pub fn missing_columns(header: &[String], require_project: bool) -> Vec<String> {
    let mut required: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    if require_project {
        required.push(PROJECT);
    }
    required
        .iter()
        .filter(|c| !header.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect()
}
