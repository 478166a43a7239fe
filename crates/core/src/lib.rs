//! SitePulse domain logic: job records, worksheet normalization, calendar
//! windows, budget analytics, and chart view models.
//!
//! Everything in this crate is a pure function of its inputs -- no I/O, no
//! clocks, no global state. The store and API crates feed it normalized
//! tables and session context and serialize what comes back.

pub mod analytics;
pub mod calendar;
pub mod charts;
pub mod columns;
pub mod job;
pub mod normalize;
pub mod session;
pub mod validate;
