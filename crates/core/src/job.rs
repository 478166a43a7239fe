//! Job record model: the typed shape of one worksheet row.

use chrono::NaiveDate;
use uuid::Uuid;

/// Lifecycle status of a job, as stored in the worksheet's `Status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum JobStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    Cancelled,
}

impl JobStatus {
    /// All statuses, in the order the status filter presents them.
    pub const ALL: [JobStatus; 5] = [
        Self::Planned,
        Self::InProgress,
        Self::Completed,
        Self::OnHold,
        Self::Cancelled,
    ];

    /// The label used in the worksheet and in API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parse a worksheet cell. Empty or unrecognized text coerces to
    /// `Planned`, matching how foreign sheets with sloppy status values
    /// are tolerated on read.
    pub fn parse_or_planned(raw: &str) -> Self {
        match raw.trim() {
            "Planned" => Self::Planned,
            "In Progress" => Self::InProgress,
            "Completed" => Self::Completed,
            "On Hold" => Self::OnHold,
            "Cancelled" => Self::Cancelled,
            _ => Self::Planned,
        }
    }

    /// Strict parse for the status filter, where an unknown value is a
    /// caller error rather than something to paper over.
    pub fn parse_strict(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw.trim())
    }

    /// Timeline bar color for this status.
    pub fn color(self) -> &'static str {
        match self {
            Self::Planned => "#FFA500",
            Self::InProgress => "#1E90FF",
            Self::Completed => "#32CD32",
            Self::OnHold => "#FF6347",
            Self::Cancelled => "#808080",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of construction work, as loaded from the worksheet.
///
/// `id` is `None` for rows created outside SitePulse (foreign sheets without
/// a `Job ID` column); such rows render everywhere but cannot be mutated.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JobRecord {
    pub id: Option<Uuid>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub estimated_cost: f64,
    pub estimated_duration: Option<u32>,
    pub status: JobStatus,
    pub project: Option<String>,
}

impl JobRecord {
    /// Session-scoped completion key: `"{name}_{YYYYMMDD}"`.
    ///
    /// Deliberately independent of `id` and `status` -- completion marks are
    /// a per-session overlay, and the key format survives sheets that lack
    /// a `Job ID` column.
    pub fn key(&self) -> String {
        format!("{}_{}", self.name, self.start_date.format("%Y%m%d"))
    }
}

/// Write-side job payload. The store assigns the id on append, so drafts
/// never carry one.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JobDraft {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub estimated_cost: f64,
    #[serde(default)]
    pub estimated_duration: Option<u32>,
    #[serde(default = "default_status")]
    pub status: JobStatus,
    #[serde(default)]
    pub project: Option<String>,
}

fn default_status() -> JobStatus {
    JobStatus::Planned
}

impl JobDraft {
    /// Materialize the draft as a stored record with the given id.
    pub fn into_record(self, id: Uuid) -> JobRecord {
        JobRecord {
            id: Some(id),
            name: self.name.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            estimated_cost: self.estimated_cost,
            estimated_duration: self.estimated_duration,
            status: self.status,
            project: self.project,
        }
    }
}
