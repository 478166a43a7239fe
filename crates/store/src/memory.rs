//! In-memory worksheet backend for demo mode and tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use sitepulse_core::columns;

use crate::error::{StoreError, StoreResult};
use crate::worksheet::Worksheet;

/// A worksheet held entirely in process memory. Same contract as the remote
/// backend, including the 0-based data-row indexing.
pub struct InMemoryWorksheet {
    address: String,
    grid: Mutex<Vec<Vec<String>>>,
    writes: AtomicUsize,
}

impl InMemoryWorksheet {
    /// Empty worksheet with the canonical header already in place.
    pub fn new(address: &str, include_project: bool) -> Self {
        Self {
            address: address.to_string(),
            grid: Mutex::new(vec![columns::canonical_header(include_project)]),
            writes: AtomicUsize::new(0),
        }
    }

    /// Worksheet with an arbitrary grid (header first). Tests use this to
    /// simulate foreign sheets with odd headers.
    pub fn with_grid(address: &str, grid: Vec<Vec<String>>) -> Self {
        Self {
            address: address.to_string(),
            grid: Mutex::new(grid),
            writes: AtomicUsize::new(0),
        }
    }

    /// How many mutating calls this worksheet has received. Lets tests
    /// assert that a rejected submission produced zero writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Worksheet for InMemoryWorksheet {
    fn address(&self) -> String {
        self.address.clone()
    }

    async fn fetch_grid(&self) -> StoreResult<Vec<Vec<String>>> {
        Ok(self.grid.lock().await.clone())
    }

    async fn append_row(&self, row: Vec<String>) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.grid.lock().await.push(row);
        Ok(())
    }

    async fn update_row(&self, index: usize, row: Vec<String>) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut grid = self.grid.lock().await;
        let slot = grid
            .get_mut(index + 1)
            .ok_or_else(|| StoreError::Backend(format!("row index {index} out of range")))?;
        *slot = row;
        Ok(())
    }

    async fn delete_row(&self, index: usize) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut grid = self.grid.lock().await;
        if index + 1 >= grid.len() {
            return Err(StoreError::Backend(format!(
                "row index {index} out of range"
            )));
        }
        grid.remove(index + 1);
        Ok(())
    }
}
