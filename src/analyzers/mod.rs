//! Read-side analysis over a gradebook.
//!
//! This module derives composite (weighted) scores, per-subject statistics
//! and performance bands, and packages them into serializable summaries.

pub mod aggregate;
pub mod grade;
pub mod subject;
pub mod types;
