use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};

use crate::analyzers::aggregate::WeightedAggregator;
use crate::analyzers::subject::SubjectAnalyzer;
use crate::analyzers::types::ClassReport;
use crate::error::GradeResult;
use crate::store::GradeStore;
use crate::weights::WeightTable;

/// The engine: one grade store and one weight table, owned together.
///
/// Writes go through `&mut self`; every read builds its answer from the
/// current tables and keeps nothing.
#[derive(Debug, Default, Clone)]
pub struct Gradebook {
    store: GradeStore,
    weights: WeightTable,
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_grade(&mut self, student: &str, subject: &str, score: i64) -> GradeResult<()> {
        self.store.add_grade(student, subject, score)?;
        debug!(student, subject, score, "Grade recorded");
        Ok(())
    }

    pub fn set_weights<I, S>(&mut self, weights: I) -> GradeResult<()>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.weights.set_weights(weights)
    }

    pub fn get_grade(&self, student: &str, subject: &str) -> Option<u32> {
        self.store.get_grade(student, subject)
    }

    pub fn get_weight(&self, subject: &str) -> f64 {
        self.weights.get_weight(subject)
    }

    pub fn store(&self) -> &GradeStore {
        &self.store
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn weighted(&self) -> WeightedAggregator<'_> {
        WeightedAggregator::new(&self.store, &self.weights)
    }

    pub fn subjects(&self) -> SubjectAnalyzer<'_> {
        SubjectAnalyzer::new(&self.store)
    }

    /// Summaries of every subject seen plus the composite statistics.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GradeError::InvalidArgument`] if `interval` is 0.
    pub fn class_report(&self, interval: u32) -> GradeResult<ClassReport> {
        let subjects = self.subjects();
        let summaries = self
            .store
            .subjects()
            .into_iter()
            .map(|s| subjects.summary(s, interval))
            .collect::<GradeResult<Vec<_>>>()?;

        let weighted = self.weighted();
        let report = ClassReport {
            generated_at: Utc::now(),
            weights: self
                .weights
                .iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
            subjects: summaries,
            weighted: weighted.summary(),
            ranking: weighted.ranking(),
        };

        info!(
            students = self.store.student_count(),
            subjects = report.subjects.len(),
            weighted_average = report.weighted.average,
            "Class report built"
        );
        Ok(report)
    }
}
