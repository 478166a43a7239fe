//! HTTP handlers, one module per resource.

pub mod dashboard;
pub mod jobs;
pub mod projects;
pub mod refresh;
pub mod session;
