use uuid::Uuid;

/// Store-layer error taxonomy.
///
/// Configuration problems (`Credentials`, `InvalidSheetUrl`,
/// `MissingColumns`) and transient I/O (`Unreachable`, `Unauthorized`,
/// `Backend`) are all soft failures: callers report them inline and the
/// process stays up. There is no retry and no backoff at this layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Google credentials not found: {0}")]
    Credentials(String),

    #[error("Not a Google Sheets URL: {0}")]
    InvalidSheetUrl(String),

    #[error("Worksheet is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Store unreachable: {0}")]
    Unreachable(String),

    #[error("Store rejected our credentials: {0}")]
    Unauthorized(String),

    #[error("Job {0} not found in the store")]
    NotFound(Uuid),

    /// The stored row no longer matches the snapshot the client loaded.
    #[error("Job was modified by someone else since it was loaded")]
    StaleWrite,

    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            StoreError::Unreachable(err.to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}
