//! The worksheet backend trait.

use async_trait::async_trait;

use crate::error::StoreResult;

/// One tabular worksheet: a header row plus data rows of text cells.
///
/// Row indexes are 0-based data-row ordinals (the header is excluded);
/// backends translate to their own offsets. Implementations are the Google
/// Sheets tab and the in-memory store used by demo mode and tests.
#[async_trait]
pub trait Worksheet: Send + Sync {
    /// Stable address of this worksheet, used as the read-cache key.
    fn address(&self) -> String;

    /// Fetch every row including the header. If the worksheet tab does not
    /// exist yet, the backend creates it with the canonical header and
    /// returns the header-only grid.
    async fn fetch_grid(&self) -> StoreResult<Vec<Vec<String>>>;

    /// Append one data row. Not idempotent: a repeated call produces a
    /// duplicate row.
    async fn append_row(&self, row: Vec<String>) -> StoreResult<()>;

    /// Overwrite the data row at `index`.
    async fn update_row(&self, index: usize, row: Vec<String>) -> StoreResult<()>;

    /// Remove the data row at `index`; later rows shift up.
    async fn delete_row(&self, index: usize) -> StoreResult<()>;
}
