//! Descriptive statistics over plain numeric slices.
//!
//! Every function is total: empty input yields a defined default (0.0 or an
//! empty collection) instead of an error.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of an unsorted slice. Even counts average the two middle values.
/// Returns 0.0 for empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(values);
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Computes the population variance (divisor N) around a given center.
/// Returns 0.0 for empty input.
pub fn variance_about(values: &[f64], center: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - center).powi(2)).sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    variance_about(values, mean).sqrt()
}

/// Population variance around the slice's own mean.
pub fn variance(values: &[f64]) -> f64 {
    variance_about(values, mean(values))
}

pub fn standard_deviation(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Quantile of an ascending slice using nearest rank with midpoint averaging.
///
/// With `pos = N * q`: an integral `pos` averages the values at 0-based
/// indices `pos - 1` and `pos`; otherwise the value at `ceil(pos) - 1` is
/// returned. `q` is clamped to `[0, 1]` and indices to `[0, N - 1]`, so
/// `q = 0` gives the first value and `q = 1` the last.
///
/// Returns 0.0 for empty input.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let q = if q.is_nan() { 0.0 } else { q.clamp(0.0, 1.0) };
    let pos = n as f64 * q;

    if pos == pos.floor() {
        let pos = pos as usize;
        let lower = pos.saturating_sub(1).min(n - 1);
        let upper = pos.min(n - 1);
        (sorted[lower] + sorted[upper]) / 2.0
    } else {
        let idx = (pos.ceil() as usize).saturating_sub(1).min(n - 1);
        sorted[idx]
    }
}

/// Interquartile range `Q3 - Q1` of an unsorted slice.
pub fn iqr(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(values);
    quantile(&sorted, 0.75) - quantile(&sorted, 0.25)
}

/// Largest value, or 0.0 for empty input.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Smallest value, or 0.0 for empty input.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Every value that reaches the highest frequency, in ascending order.
pub fn mode<T: Ord + Copy>(values: &[T]) -> Vec<T> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(*v).or_default() += 1;
    }
    let Some(top) = counts.values().copied().max() else {
        return Vec::new();
    };
    counts
        .into_iter()
        .filter(|(_, c)| *c == top)
        .map(|(v, _)| v)
        .collect()
}

/// Percentage of `reference` strictly below `value`. Returns 0.0 when the
/// reference is empty.
pub fn percentile_rank<T: PartialOrd>(value: T, reference: &[T]) -> f64 {
    if reference.is_empty() {
        return 0.0;
    }
    let below = reference.iter().filter(|v| **v < value).count();
    below as f64 * 100.0 / reference.len() as f64
}

/// Rounds to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Ascending copy; NaN compares equal so it never panics.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_empty_and_normal() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[5.0]), 5.0);
        assert_eq!(mean(&[50.0, 60.0, 70.0]), 60.0);
    }

    #[test]
    fn test_median_parity() {
        assert_eq!(median(&[50.0, 60.0]), 55.0);
        assert_eq!(median(&[50.0, 60.0, 70.0]), 60.0);
        assert_eq!(median(&[70.0, 50.0, 60.0]), 60.0);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_variance_is_population() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx(variance(&v), 4.0));
        assert!(approx(standard_deviation(&v), 2.0));
        assert_eq!(variance(&[]), 0.0);
    }

    #[test]
    fn test_stddev_about_given_center() {
        let v = [1.0, 3.0];
        assert!(approx(stddev(&v, 2.0), 1.0));
        assert!(approx(variance_about(&v, 0.0), 5.0));
    }

    #[test]
    fn test_quantile_five_values() {
        let v = [50.0, 60.0, 70.0, 80.0, 90.0];
        assert_eq!(quantile(&v, 0.25), 60.0);
        assert_eq!(quantile(&v, 0.75), 80.0);
        assert_eq!(iqr(&v), 20.0);
    }

    #[test]
    fn test_quantile_integral_position_averages() {
        let v = [10.0, 20.0, 30.0, 40.0];
        // pos = 1 -> mean of indices 0 and 1
        assert_eq!(quantile(&v, 0.25), 15.0);
        // pos = 3 -> mean of indices 2 and 3
        assert_eq!(quantile(&v, 0.75), 35.0);
        assert_eq!(quantile(&v, 0.5), 25.0);
    }

    #[test]
    fn test_quantile_boundaries_clamp() {
        let v = [10.0, 20.0, 30.0];
        assert_eq!(quantile(&v, 0.0), 10.0);
        assert_eq!(quantile(&v, 1.0), 30.0);
        assert_eq!(quantile(&v, 2.0), 30.0);
        assert_eq!(quantile(&[], 0.5), 0.0);
        assert_eq!(quantile(&[42.0], 0.25), 42.0);
    }

    #[test]
    fn test_iqr_sorts_input() {
        assert_eq!(iqr(&[90.0, 50.0, 80.0, 60.0, 70.0]), 20.0);
        assert_eq!(iqr(&[]), 0.0);
    }

    #[test]
    fn test_max_min_default_zero() {
        assert_eq!(max(&[]), 0.0);
        assert_eq!(min(&[]), 0.0);
        assert_eq!(max(&[3.0, 9.0, 1.0]), 9.0);
        assert_eq!(min(&[3.0, 9.0, 1.0]), 1.0);
    }

    #[test]
    fn test_mode_single_and_multi() {
        assert_eq!(mode(&[70, 70, 60]), vec![70]);
        assert_eq!(mode(&[70, 70, 60, 60]), vec![60, 70]);
        assert_eq!(mode(&[1, 2, 3]), vec![1, 2, 3]);
        assert!(mode::<u32>(&[]).is_empty());
    }

    #[test]
    fn test_percentile_rank() {
        let v = [30.0, 50.0, 70.0, 90.0];
        assert_eq!(percentile_rank(30.0, &v), 0.0);
        assert_eq!(percentile_rank(70.0, &v), 50.0);
        assert_eq!(percentile_rank(100.0, &v), 100.0);
        assert_eq!(percentile_rank(10.0, &[] as &[f64]), 0.0);
    }

    #[test]
    fn test_percentile_rank_is_monotonic() {
        let v = [40, 55, 55, 70, 85, 90];
        let mut last = 0.0;
        for probe in 0..=100 {
            let pr = percentile_rank(probe, &v);
            assert!(pr >= last);
            last = pr;
        }
    }

    #[test]
    fn test_round1_half_away_from_zero() {
        assert_eq!(round1(66.66666), 66.7);
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(-0.25), -0.3);
        assert_eq!(round1(60.0), 60.0);
    }
}
