//! Raw grade storage: student → subject → score.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{GradeError, GradeResult};

/// Owns every recorded score. Students are kept in name order so that any
/// traversal of "all students" is deterministic.
#[derive(Debug, Default, Clone)]
pub struct GradeStore {
    grades: BTreeMap<String, BTreeMap<String, u32>>,
}

impl GradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `score` for `(student, subject)`, replacing any earlier value.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError::InvalidArgument`] if either name is empty or the
    /// score is negative. Nothing is written in that case.
    pub fn add_grade(&mut self, student: &str, subject: &str, score: i64) -> GradeResult<()> {
        if student.is_empty() {
            return Err(GradeError::InvalidArgument("student name is empty".into()));
        }
        if subject.is_empty() {
            return Err(GradeError::InvalidArgument("subject is empty".into()));
        }
        let score = u32::try_from(score).map_err(|_| {
            GradeError::InvalidArgument(format!("score {score} for {student}/{subject} is out of range"))
        })?;

        self.grades
            .entry(student.to_string())
            .or_default()
            .insert(subject.to_string(), score);
        Ok(())
    }

    pub fn get_grade(&self, student: &str, subject: &str) -> Option<u32> {
        self.grades.get(student)?.get(subject).copied()
    }

    pub fn contains_student(&self, student: &str) -> bool {
        self.grades.contains_key(student)
    }

    pub fn grades_of(&self, student: &str) -> Option<&BTreeMap<String, u32>> {
        self.grades.get(student)
    }

    pub fn student_count(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    pub fn student_names(&self) -> impl Iterator<Item = &str> {
        self.grades.keys().map(String::as_str)
    }

    /// Iterates `(student, grades)` in student name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, u32>)> {
        self.grades.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every subject that at least one student has a score for.
    pub fn subjects(&self) -> BTreeSet<&str> {
        self.grades
            .values()
            .flat_map(|g| g.keys().map(String::as_str))
            .collect()
    }

    /// One score per known student; students without the subject count as 0.
    pub fn scores_for(&self, subject: &str) -> Vec<u32> {
        self.grades
            .values()
            .map(|g| g.get(subject).copied().unwrap_or(0))
            .collect()
    }

    /// Students that actually took `subject`, highest score first. Equal
    /// scores keep student name order.
    pub fn sorted_grades_by_subject(&self, subject: &str) -> Vec<(String, u32)> {
        let mut rows: Vec<(String, u32)> = self
            .grades
            .iter()
            .filter_map(|(name, g)| g.get(subject).map(|s| (name.clone(), *s)))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}
