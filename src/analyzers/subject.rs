//! Per-subject statistics.
//!
//! The sample for a subject always has one entry per known student; students
//! who never took the subject contribute a 0. Average, median, variance,
//! standard deviation and IQR are published rounded to one decimal place,
//! unlike the composite statistics in [`super::aggregate`].

use crate::analyzers::types::SubjectSummary;
use crate::distribution::{self, Distribution};
use crate::error::GradeResult;
use crate::stats::{self, round1};
use crate::store::GradeStore;

#[derive(Debug, Clone, Copy)]
pub struct SubjectAnalyzer<'a> {
    store: &'a GradeStore,
}

impl<'a> SubjectAnalyzer<'a> {
    pub fn new(store: &'a GradeStore) -> Self {
        Self { store }
    }

    fn sample(&self, subject: &str) -> Vec<f64> {
        self.store
            .scores_for(subject)
            .into_iter()
            .map(f64::from)
            .collect()
    }

    pub fn average(&self, subject: &str) -> f64 {
        round1(stats::mean(&self.sample(subject)))
    }

    pub fn median(&self, subject: &str) -> f64 {
        round1(stats::median(&self.sample(subject)))
    }

    /// Population variance centred on the published (rounded) average.
    pub fn variance(&self, subject: &str) -> f64 {
        round1(stats::variance_about(&self.sample(subject), self.average(subject)))
    }

    pub fn standard_deviation(&self, subject: &str) -> f64 {
        round1(stats::stddev(&self.sample(subject), self.average(subject)))
    }

    pub fn iqr(&self, subject: &str) -> f64 {
        round1(stats::iqr(&self.sample(subject)))
    }

    pub fn max(&self, subject: &str) -> u32 {
        self.store.scores_for(subject).into_iter().max().unwrap_or(0)
    }

    pub fn min(&self, subject: &str) -> u32 {
        self.store.scores_for(subject).into_iter().min().unwrap_or(0)
    }

    pub fn mode(&self, subject: &str) -> Vec<u32> {
        stats::mode(&self.store.scores_for(subject))
    }

    /// Percentage of the subject sample strictly below `score`.
    pub fn percentile_rank(&self, subject: &str, score: u32) -> f64 {
        stats::percentile_rank(score, &self.store.scores_for(subject))
    }

    /// # Errors
    ///
    /// Returns [`crate::GradeError::InvalidArgument`] if `interval` is 0.
    pub fn distribution(&self, subject: &str, interval: u32) -> GradeResult<Distribution> {
        distribution::by_interval(&self.store.scores_for(subject), interval)
    }

    /// Every per-subject figure in one pass over a single sample.
    pub fn summary(&self, subject: &str, interval: u32) -> GradeResult<SubjectSummary> {
        let raw = self.store.scores_for(subject);
        let sample: Vec<f64> = raw.iter().copied().map(f64::from).collect();
        let average = round1(stats::mean(&sample));

        Ok(SubjectSummary {
            subject: subject.to_string(),
            sample_size: raw.len(),
            average,
            median: round1(stats::median(&sample)),
            variance: round1(stats::variance_about(&sample, average)),
            standard_deviation: round1(stats::stddev(&sample, average)),
            iqr: round1(stats::iqr(&sample)),
            max: raw.iter().copied().max().unwrap_or(0),
            min: raw.iter().copied().min().unwrap_or(0),
            mode: stats::mode(&raw),
            distribution: distribution::by_interval(&raw, interval)?,
        })
    }
}
