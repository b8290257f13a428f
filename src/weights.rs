use std::collections::BTreeMap;

use crate::error::{GradeError, GradeResult};

/// Subject weights used for composite scores. A subject with no entry has
/// weight 0.0.
#[derive(Debug, Default, Clone)]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `weights` into the table, overwriting subjects already present
    /// and leaving the rest untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError::InvalidArgument`] for an empty subject or a
    /// negative or non-finite weight. The table is unchanged on error.
    pub fn set_weights<I, S>(&mut self, weights: I) -> GradeResult<()>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let incoming: Vec<(String, f64)> = weights.into_iter().map(|(s, w)| (s.into(), w)).collect();

        for (subject, weight) in &incoming {
            if subject.is_empty() {
                return Err(GradeError::InvalidArgument("weight subject is empty".into()));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(GradeError::InvalidArgument(format!(
                    "weight for {subject} must be a non-negative number, got {weight}"
                )));
            }
        }

        self.weights.extend(incoming);
        Ok(())
    }

    pub fn get_weight(&self, subject: &str) -> f64 {
        self.weights.get(subject).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
