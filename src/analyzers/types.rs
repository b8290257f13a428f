//! Serializable snapshots produced by the analyzers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analyzers::grade::Band;
use crate::distribution::Distribution;

/// Statistics for a single subject. Figures marked rounded carry one decimal.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectSummary {
    pub subject: String,
    /// Sample size: every known student, including those without a score.
    pub sample_size: usize,
    pub average: f64,
    pub median: f64,
    pub variance: f64,
    pub standard_deviation: f64,
    pub iqr: f64,
    pub max: u32,
    pub min: u32,
    pub mode: Vec<u32>,
    pub distribution: Distribution,
}

/// Statistics over the composite scores of every student. Nothing here is rounded.
#[derive(Debug, Clone, Serialize)]
pub struct WeightedSummary {
    pub student_count: usize,
    pub average: f64,
    pub median: f64,
    pub variance: f64,
    pub standard_deviation: f64,
    pub iqr: f64,
    pub max: f64,
    pub min: f64,
    pub distribution: Distribution,
}

/// One row of the composite ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStudent {
    pub student: String,
    pub score: f64,
    pub band: Band,
    pub percentile_rank: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    pub student: String,
    pub composite: f64,
    pub band: Band,
    pub percentile_rank: f64,
    pub grades: BTreeMap<String, u32>,
}

/// Complete class report, written as JSON by the `report` command.
#[derive(Debug, Clone, Serialize)]
pub struct ClassReport {
    pub generated_at: DateTime<Utc>,
    pub weights: BTreeMap<String, f64>,
    pub subjects: Vec<SubjectSummary>,
    pub weighted: WeightedSummary,
    pub ranking: Vec<RankedStudent>,
}
