use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use crate::analyzers::grade::band;
use crate::analyzers::types::{RankedStudent, StudentSummary, WeightedSummary};
use crate::distribution::{self, Distribution};
use crate::error::{GradeError, GradeResult};
use crate::stats;
use crate::store::GradeStore;
use crate::weights::WeightTable;

/// Composite-score view over a [`GradeStore`] and [`WeightTable`].
///
/// Holds no state of its own: every call recomputes from the borrowed tables.
#[derive(Debug, Clone, Copy)]
pub struct WeightedAggregator<'a> {
    store: &'a GradeStore,
    weights: &'a WeightTable,
}

impl<'a> WeightedAggregator<'a> {
    pub fn new(store: &'a GradeStore, weights: &'a WeightTable) -> Self {
        Self { store, weights }
    }

    /// Weighted average over the subjects `student` actually has scores for.
    ///
    /// Subjects the student never took are left out of both the weighted
    /// total and the weight sum. If every scored subject has weight 0 the
    /// composite is 0.0.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError::StudentNotFound`] for an unknown student.
    pub fn weighted_average(&self, student: &str) -> GradeResult<f64> {
        let grades = self
            .store
            .grades_of(student)
            .ok_or_else(|| GradeError::StudentNotFound(student.to_string()))?;
        Ok(self.composite(student, grades))
    }

    fn composite(&self, student: &str, grades: &BTreeMap<String, u32>) -> f64 {
        let mut weighted_total = 0.0;
        let mut weight_sum = 0.0;

        for (subject, score) in grades {
            let weight = self.weights.get_weight(subject);
            weighted_total += f64::from(*score) * weight;
            weight_sum += weight;
        }

        if weight_sum == 0.0 {
            debug!(student, "No weighted subjects, composite defaults to 0");
            0.0
        } else {
            weighted_total / weight_sum
        }
    }

    /// `(student, composite)` for every student, in student name order.
    fn composites(&self) -> Vec<(String, f64)> {
        self.store
            .iter()
            .map(|(name, grades)| (name.to_string(), self.composite(name, grades)))
            .collect()
    }

    /// Every student's composite, highest first.
    pub fn all_weighted_scores(&self) -> Vec<f64> {
        let mut scores: Vec<f64> = self.composites().into_iter().map(|(_, s)| s).collect();
        scores.sort_by(|a, b| descending(*a, *b));
        scores
    }

    /// Mean of the composites, each student counting once.
    pub fn weighted_average_score(&self) -> f64 {
        stats::mean(&self.all_weighted_scores())
    }

    /// `(student, composite)` pairs, highest first. Equal scores keep student
    /// name order.
    pub fn sorted_weighted_scores(&self) -> Vec<(String, f64)> {
        let mut rows = self.composites();
        rows.sort_by(|a, b| descending(a.1, b.1));
        rows
    }

    /// Students whose composite lies in `[min, max]`, in name order.
    pub fn find_students_by_score_range(&self, min: f64, max: f64) -> Vec<String> {
        self.composites()
            .into_iter()
            .filter(|(_, score)| *score >= min && *score <= max)
            .map(|(name, _)| name)
            .collect()
    }

    /// Percentile rank of each student's composite within all composites.
    pub fn all_weighted_prs(&self) -> BTreeMap<String, f64> {
        let population = self.all_weighted_scores();
        self.composites()
            .into_iter()
            .map(|(name, score)| (name, stats::percentile_rank(score, &population)))
            .collect()
    }

    pub fn weighted_median_score(&self) -> f64 {
        stats::median(&self.all_weighted_scores())
    }

    pub fn weighted_variance(&self) -> f64 {
        stats::variance_about(&self.all_weighted_scores(), self.weighted_average_score())
    }

    pub fn weighted_standard_deviation(&self) -> f64 {
        stats::stddev(&self.all_weighted_scores(), self.weighted_average_score())
    }

    pub fn weighted_iqr(&self) -> f64 {
        stats::iqr(&self.all_weighted_scores())
    }

    pub fn weighted_max(&self) -> f64 {
        stats::max(&self.all_weighted_scores())
    }

    pub fn weighted_min(&self) -> f64 {
        stats::min(&self.all_weighted_scores())
    }

    /// Composites binned into the five fixed bands.
    pub fn weighted_score_distribution(&self) -> Distribution {
        distribution::banded(&self.all_weighted_scores())
    }

    /// Ranking rows with band and percentile rank, highest composite first.
    pub fn ranking(&self) -> Vec<RankedStudent> {
        let population = self.all_weighted_scores();
        self.sorted_weighted_scores()
            .into_iter()
            .map(|(student, score)| RankedStudent {
                student,
                score,
                band: band(score),
                percentile_rank: stats::percentile_rank(score, &population),
            })
            .collect()
    }

    pub fn summary(&self) -> WeightedSummary {
        let scores = self.all_weighted_scores();
        let average = stats::mean(&scores);
        WeightedSummary {
            student_count: scores.len(),
            average,
            median: stats::median(&scores),
            variance: stats::variance_about(&scores, average),
            standard_deviation: stats::stddev(&scores, average),
            iqr: stats::iqr(&scores),
            max: stats::max(&scores),
            min: stats::min(&scores),
            distribution: distribution::banded(&scores),
        }
    }

    /// # Errors
    ///
    /// Returns [`GradeError::StudentNotFound`] for an unknown student.
    pub fn student_summary(&self, student: &str) -> GradeResult<StudentSummary> {
        let composite = self.weighted_average(student)?;
        let grades = self
            .store
            .grades_of(student)
            .cloned()
            .unwrap_or_default();
        Ok(StudentSummary {
            student: student.to_string(),
            composite,
            band: band(composite),
            percentile_rank: stats::percentile_rank(composite, &self.all_weighted_scores()),
            grades,
        })
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
