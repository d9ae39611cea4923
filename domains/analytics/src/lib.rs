//! Read-only figures derived from an already-fetched event list.
//!
//! Nothing here performs I/O or fails. Every function that depends on the
//! current date takes it as a `today` argument.

pub mod aggregations;
pub mod calendar;
pub mod dashboard;
pub mod sample;

pub use aggregations::{AnalyticsReport, CategoryShare};
pub use dashboard::{CategoryLegendRow, DashboardSnapshot};
