//! Record store adapter: worksheet backends, the TTL read cache, and the
//! id-addressed job repository.
//!
//! The remote worksheet is the system of record. [`JobStore`] is the only
//! writer of durable state; everything above it works on normalized
//! [`sitepulse_core::job::JobRecord`] tables.

pub mod auth;
pub mod cache;
pub mod error;
pub mod job_store;
pub mod memory;
pub mod sample;
pub mod sheets;
pub mod worksheet;

pub use error::{StoreError, StoreResult};
pub use job_store::JobStore;
pub use memory::InMemoryWorksheet;
pub use sheets::GoogleSheetsWorksheet;
pub use worksheet::Worksheet;
