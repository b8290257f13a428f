//! Score-distribution binning.
//!
//! Two schemes are supported: the fixed five-band scheme used for composite
//! scores ([`banded`]) and the interval scheme used for raw subject scores
//! ([`by_interval`]).

use serde::Serialize;

use crate::analyzers::grade::{Band, band};
use crate::error::{GradeError, GradeResult};

/// One labelled score range and how many scores fell into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub start: u32,
    pub end: u32,
    pub count: u64,
}

/// Buckets in ascending range order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    buckets: Vec<Bucket>,
}

impl Distribution {
    /// Count for the bucket labelled `label`, if it exists.
    pub fn get(&self, label: &str) -> Option<u64> {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.count)
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of every bucket count; always equals the binned sample size.
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Bins composite scores into the five [`Band`] buckets. Every band is
/// present even when empty.
pub fn banded(scores: &[f64]) -> Distribution {
    let mut buckets: Vec<Bucket> = Band::ALL
        .iter()
        .map(|b| {
            let (start, end) = b.range();
            Bucket {
                label: b.label().to_string(),
                start,
                end,
                count: 0,
            }
        })
        .collect();

    for score in scores {
        buckets[band(*score) as usize].count += 1;
    }

    Distribution { buckets }
}

/// Bins integer scores into consecutive ranges of width `interval`.
///
/// Buckets run from `floor(min / interval) * interval` up to the maximum
/// score, each labelled `"<start>-<start + interval - 1>"`. Empty input
/// behaves like a single score of 0.
///
/// # Errors
///
/// Returns [`GradeError::InvalidArgument`] if `interval` is 0.
pub fn by_interval(scores: &[u32], interval: u32) -> GradeResult<Distribution> {
    if interval == 0 {
        return Err(GradeError::InvalidArgument(
            "distribution interval must be positive".into(),
        ));
    }

    let min_grade = scores.iter().copied().min().unwrap_or(0);
    let max_grade = scores.iter().copied().max().unwrap_or(0);
    let first = (min_grade / interval) * interval;

    let mut buckets = Vec::new();
    let mut start = first;
    loop {
        let end = start.saturating_add(interval - 1);
        buckets.push(Bucket {
            label: format!("{start}-{end}"),
            start,
            end,
            count: 0,
        });
        match start.checked_add(interval) {
            Some(next) if next <= max_grade => start = next,
            _ => break,
        }
    }

    for score in scores {
        let idx = ((score / interval) * interval - first) / interval;
        buckets[idx as usize].count += 1;
    }

    Ok(Distribution { buckets })
}
