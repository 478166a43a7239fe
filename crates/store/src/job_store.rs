//! The job repository: normalized reads through the TTL cache and
//! id-addressed, precondition-checked writes.
//!
//! Every mutation re-reads the sheet fresh, locates the target row by its
//! `Job ID` cell, and invalidates the read cache before returning. There is
//! no cross-session transaction: concurrent writers are last-write-wins
//! except where the update precondition catches the conflict.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use sitepulse_core::columns;
use sitepulse_core::job::{JobDraft, JobRecord};
use sitepulse_core::normalize;

use crate::cache::TableCache;
use crate::error::{StoreError, StoreResult};
use crate::worksheet::Worksheet;

pub struct JobStore {
    worksheet: Arc<dyn Worksheet>,
    cache: TableCache,
    /// Grouped-by-project mode makes the `Project` column required.
    require_project: bool,
}

impl JobStore {
    pub fn new(worksheet: Arc<dyn Worksheet>, ttl: Duration, require_project: bool) -> Self {
        Self {
            worksheet,
            cache: TableCache::new(ttl),
            require_project,
        }
    }

    pub fn address(&self) -> String {
        self.worksheet.address()
    }

    /// The normalized table, via the read cache.
    pub async fn load(&self) -> StoreResult<Arc<Vec<JobRecord>>> {
        let address = self.worksheet.address();
        if let Some(table) = self.cache.get(&address).await {
            return Ok(table);
        }

        let table = Arc::new(self.fetch_fresh().await?.1);
        self.cache.insert(address, Arc::clone(&table)).await;
        Ok(table)
    }

    /// Drop the cache entry so the next read hits the worksheet.
    pub async fn refresh(&self) {
        self.cache.invalidate(&self.worksheet.address()).await;
    }

    /// Append a draft as a new row with a freshly assigned id.
    ///
    /// Not idempotent: calling twice writes two rows. The caller validates
    /// the draft first; the store only assigns identity and serializes.
    pub async fn append(&self, draft: JobDraft) -> StoreResult<JobRecord> {
        let (header, _) = self.fetch_fresh().await?;
        let record = draft.into_record(Uuid::new_v4());
        self.worksheet
            .append_row(serialize_row(&record, &header))
            .await?;
        self.refresh().await;
        tracing::debug!(id = %record.id.unwrap_or_default(), name = %record.name, "Appended job row");
        Ok(record)
    }

    /// Replace the row holding `id`, but only if it still matches
    /// `expected` -- the snapshot the client loaded. A changed row fails
    /// with [`StoreError::StaleWrite`] and is left untouched.
    pub async fn update(
        &self,
        id: Uuid,
        expected: &JobRecord,
        draft: JobDraft,
    ) -> StoreResult<JobRecord> {
        let (header, grid) = self.fetch_raw().await?;
        let (position, current) = locate(&header, &grid, id)?;
        if current != *expected {
            return Err(StoreError::StaleWrite);
        }

        let record = draft.into_record(id);
        self.worksheet
            .update_row(position, serialize_row(&record, &header))
            .await?;
        self.refresh().await;
        tracing::debug!(%id, "Updated job row");
        Ok(record)
    }

    /// Delete the row holding `id`.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let (header, grid) = self.fetch_raw().await?;
        let (position, _) = locate(&header, &grid, id)?;
        self.worksheet.delete_row(position).await?;
        self.refresh().await;
        tracing::debug!(%id, "Deleted job row");
        Ok(())
    }

    /// Fetch and normalize, bypassing the cache. Returns the sheet's own
    /// header (writes serialize by it) alongside the table.
    async fn fetch_fresh(&self) -> StoreResult<(Vec<String>, Vec<JobRecord>)> {
        let (header, grid) = self.fetch_raw().await?;
        let outcome = normalize::normalize_grid(&grid);
        if outcome.dropped > 0 {
            tracing::warn!(
                dropped = outcome.dropped,
                "Dropped rows that failed required-field coercion"
            );
        }
        Ok((header, outcome.records))
    }

    async fn fetch_raw(&self) -> StoreResult<(Vec<String>, Vec<Vec<String>>)> {
        let grid = self.worksheet.fetch_grid().await?;
        let header = grid.first().cloned().unwrap_or_default();

        let missing = columns::missing_columns(&header, self.require_project);
        if !missing.is_empty() {
            return Err(StoreError::MissingColumns(missing));
        }
        Ok((header, grid))
    }
}

/// Serialize a record into the sheet's own column order. Columns the record
/// has no value for get an empty cell; unknown columns stay empty too.
fn serialize_row(record: &JobRecord, header: &[String]) -> Vec<String> {
    header
        .iter()
        .map(|column| match column.as_str() {
            columns::JOB_NAME => record.name.clone(),
            columns::START_DATE => record.start_date.format(normalize::DATE_FORMAT).to_string(),
            columns::END_DATE => record.end_date.format(normalize::DATE_FORMAT).to_string(),
            columns::ESTIMATED_COST => format_cost(record.estimated_cost),
            columns::ESTIMATED_DURATION => record
                .estimated_duration
                .map(|d| d.to_string())
                .unwrap_or_default(),
            columns::STATUS => record.status.as_str().to_string(),
            columns::PROJECT => record.project.clone().unwrap_or_default(),
            columns::JOB_ID => record.id.map(|id| id.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .collect()
}

/// Costs round-trip as plain decimal text; whole amounts stay integral so
/// the sheet shows `50000`, not `50000.0`.
fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 {
        format!("{cost:.0}")
    } else {
        cost.to_string()
    }
}

/// Find the data-row ordinal holding `id` and normalize that row for the
/// stale-write comparison.
fn locate(
    header: &[String],
    grid: &[Vec<String>],
    id: Uuid,
) -> StoreResult<(usize, JobRecord)> {
    let id_column = header
        .iter()
        .position(|h| h == columns::JOB_ID)
        .ok_or(StoreError::NotFound(id))?;
    let id_text = id.to_string();

    for (position, row) in grid.iter().skip(1).enumerate() {
        if row.get(id_column).map(String::as_str) == Some(id_text.as_str()) {
            let record = normalize::record_from_row(header, row)
                .ok_or_else(|| StoreError::Backend(format!("row for job {id} is unreadable")))?;
            return Ok((position, record));
        }
    }
    Err(StoreError::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    use sitepulse_core::job::JobStatus;

    use crate::memory::InMemoryWorksheet;

    fn draft(name: &str, start: &str, end: &str, cost: f64) -> JobDraft {
        JobDraft {
            name: name.to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            estimated_cost: cost,
            estimated_duration: Some(30),
            status: JobStatus::Planned,
            project: Some("Downtown Office Building".to_string()),
        }
    }

    fn store() -> (Arc<InMemoryWorksheet>, JobStore) {
        let worksheet = Arc::new(InMemoryWorksheet::new("mem://jobs", true));
        let store = JobStore::new(
            Arc::clone(&worksheet) as Arc<dyn Worksheet>,
            Duration::from_secs(300),
            true,
        );
        (worksheet, store)
    }

    #[tokio::test]
    async fn append_assigns_an_id_that_reads_back() {
        let (_, store) = store();
        let record = store
            .append(draft("Foundation Work", "2024-01-15", "2024-02-28", 50000.0))
            .await
            .unwrap();
        let id = record.id.expect("append must assign an id");

        let table = store.load().await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].id, Some(id));
        assert_eq!(table[0].name, "Foundation Work");
        assert_eq!(table[0].estimated_cost, 50000.0);
    }

    #[tokio::test]
    async fn append_is_not_idempotent() {
        let (_, store) = store();
        let d = draft("Framing", "2024-03-01", "2024-04-15", 75000.0);
        store.append(d.clone()).await.unwrap();
        store.append(d).await.unwrap();

        let table = store.load().await.unwrap();
        assert_eq!(table.len(), 2);
        assert_ne!(table[0].id, table[1].id);
    }

    #[tokio::test]
    async fn mutation_invalidates_the_cache_before_the_next_read() {
        let (worksheet, store) = store();
        // Prime the cache with the empty table.
        assert!(store.load().await.unwrap().is_empty());

        store
            .append(draft("Roofing", "2024-04-10", "2024-05-05", 45000.0))
            .await
            .unwrap();

        // Without invalidation this read would still see the cached empty
        // table -- the TTL is five minutes.
        let table = store.load().await.unwrap();
        assert_eq!(table.len(), 1);
        assert!(worksheet.write_count() > 0);
    }

    #[tokio::test]
    async fn refresh_clears_the_cache_early() {
        let (worksheet, store) = store();
        assert!(store.load().await.unwrap().is_empty());

        // Mutate the worksheet behind the store's back, as a concurrent
        // session would.
        let grid_row = {
            let record = draft("Plumbing", "2024-04-15", "2024-05-30", 25000.0)
                .into_record(Uuid::new_v4());
            serialize_row(&record, &columns::canonical_header(true))
        };
        worksheet.append_row(grid_row).await.unwrap();

        // Cached read still sees the stale table.
        assert!(store.load().await.unwrap().is_empty());

        store.refresh().await;
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_overwrites_when_the_snapshot_matches() {
        let (_, store) = store();
        let record = store
            .append(draft("Drywall", "2024-05-01", "2024-06-15", 35000.0))
            .await
            .unwrap();
        let id = record.id.unwrap();

        let mut new_draft = draft("Drywall", "2024-05-01", "2024-06-15", 38000.0);
        new_draft.status = JobStatus::InProgress;
        let updated = store.update(id, &record, new_draft).await.unwrap();
        assert_eq!(updated.id, Some(id));

        let table = store.load().await.unwrap();
        assert_eq!(table[0].estimated_cost, 38000.0);
        assert_eq!(table[0].status, JobStatus::InProgress);
    }

    #[tokio::test]
    async fn update_with_stale_snapshot_fails_and_leaves_the_row_alone() {
        let (_, store) = store();
        let record = store
            .append(draft("Flooring", "2024-06-10", "2024-07-20", 28000.0))
            .await
            .unwrap();
        let id = record.id.unwrap();

        // Another session changes the row between our load and our write.
        store
            .update(id, &record, draft("Flooring", "2024-06-10", "2024-07-20", 99000.0))
            .await
            .unwrap();

        // Our write still carries the original snapshot.
        let err = store
            .update(id, &record, draft("Flooring", "2024-06-10", "2024-07-20", 30000.0))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::StaleWrite);

        let table = store.load().await.unwrap();
        assert_eq!(table[0].estimated_cost, 99000.0);
    }

    #[tokio::test]
    async fn delete_removes_the_row_and_unknown_id_is_not_found() {
        let (_, store) = store();
        let record = store
            .append(draft("Landscaping", "2024-09-15", "2024-10-15", 20000.0))
            .await
            .unwrap();
        let id = record.id.unwrap();

        store.delete(id).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());

        let err = store.delete(id).await.unwrap_err();
        assert_matches!(err, StoreError::NotFound(_));
    }

    #[tokio::test]
    async fn rows_without_an_id_are_not_addressable() {
        let header = columns::canonical_header(true);
        let mut row: Vec<String> = vec![
            "Foreign Row".into(),
            "2024-01-01".into(),
            "2024-02-01".into(),
            "10000".into(),
            "".into(),
            "".into(),
            "".into(),
        ];
        row.push(String::new()); // empty Job ID cell
        let worksheet = Arc::new(InMemoryWorksheet::with_grid(
            "mem://foreign",
            vec![header, row],
        ));
        let store = JobStore::new(worksheet, Duration::from_secs(300), true);

        // The row loads fine...
        let table = store.load().await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].id, None);

        // ...but cannot be targeted by id-addressed mutation.
        let err = store.delete(Uuid::new_v4()).await.unwrap_err();
        assert_matches!(err, StoreError::NotFound(_));
    }

    #[tokio::test]
    async fn missing_required_columns_are_a_soft_failure() {
        let worksheet = Arc::new(InMemoryWorksheet::with_grid(
            "mem://broken",
            vec![vec!["Job Name".to_string(), "Start Date".to_string()]],
        ));
        let store = JobStore::new(worksheet, Duration::from_secs(300), false);

        let err = store.load().await.unwrap_err();
        assert_matches!(err, StoreError::MissingColumns(missing) => {
            assert!(missing.contains(&"End Date".to_string()));
        });
    }

    #[tokio::test]
    async fn writes_follow_the_sheets_own_header_order() {
        // A foreign sheet with reordered columns and no Project.
        let header: Vec<String> = [
            "Status",
            "Job Name",
            "Estimated Cost",
            "Start Date",
            "End Date",
            "Estimated Duration",
            "Job ID",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();
        let worksheet = Arc::new(InMemoryWorksheet::with_grid(
            "mem://reordered",
            vec![header],
        ));
        let store = JobStore::new(
            Arc::clone(&worksheet) as Arc<dyn Worksheet>,
            Duration::from_secs(300),
            false,
        );

        store
            .append(draft("Foundation Work", "2024-01-15", "2024-02-28", 50000.0))
            .await
            .unwrap();

        let grid = worksheet.fetch_grid().await.unwrap();
        let row = &grid[1];
        assert_eq!(row[0], "Planned");
        assert_eq!(row[1], "Foundation Work");
        assert_eq!(row[2], "50000");
        assert_eq!(row[3], "2024-01-15");
    }
}
