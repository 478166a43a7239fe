//! TTL read cache for normalized job tables.
//!
//! One entry per worksheet address, holding only the raw normalized table
//! (never filtered views). Entries expire after the configured TTL; every
//! mutating store call invalidates its own entry before the next read.
//! The cache is shared across sessions for the same address, so one
//! session's refresh changes what another observes on its next read.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use sitepulse_core::job::JobRecord;

/// Default TTL, matching the original dashboard's 5-minute read cache.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub struct TableCache {
    inner: Cache<String, Arc<Vec<JobRecord>>>,
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder().time_to_live(ttl).build(),
        }
    }

    pub async fn get(&self, address: &str) -> Option<Arc<Vec<JobRecord>>> {
        self.inner.get(address).await
    }

    pub async fn insert(&self, address: String, table: Arc<Vec<JobRecord>>) {
        self.inner.insert(address, table).await;
    }

    pub async fn invalidate(&self, address: &str) {
        self.inner.invalidate(address).await;
    }
}
