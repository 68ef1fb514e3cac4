//! Statistics over the values of a series, ignoring timestamps.

use crate::error::{Result, SeriesError};
use std::collections::HashMap;

/// Compute the arithmetic mean, `0` for an empty slice.
pub fn compute_mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return 0.0;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

/// Compute the sample variance (normalized by `n - 1`).
///
/// A single value divides zero by zero and yields NaN; callers see the
/// degenerate result rather than a substituted one.
pub fn compute_var(vals: &[f64]) -> f64 {
    let mean = compute_mean(vals);
    let diff_2_sum: f64 = vals.iter().map(|&val| (val - mean) * (val - mean)).sum();
    diff_2_sum / (vals.len() as f64 - 1.0)
}

/// Compute the covariance of two equally long slices (normalized by `n`).
///
/// # Errors
/// Returns [`SeriesError::LengthMismatch`] if the slices differ in length.
pub fn compute_cov(vals_a: &[f64], vals_b: &[f64]) -> Result<f64> {
    if vals_a.len() != vals_b.len() {
        return Err(SeriesError::LengthMismatch {
            left: vals_a.len(),
            right: vals_b.len(),
        });
    }
    let mean_a = compute_mean(vals_a);
    let mean_b = compute_mean(vals_b);
    let cross_sum: f64 = vals_a
        .iter()
        .zip(vals_b)
        .map(|(&a, &b)| (a - mean_a) * (b - mean_b))
        .sum();
    Ok(cross_sum / vals_a.len() as f64)
}

/// Largest value, skipping NaN unless every value is NaN.
pub fn compute_max(vals: &[f64]) -> Option<f64> {
    vals.iter().copied().reduce(f64::max)
}

/// Smallest value, skipping NaN unless every value is NaN.
pub fn compute_min(vals: &[f64]) -> Option<f64> {
    vals.iter().copied().reduce(f64::min)
}

/// Compute the median by selection, without sorting.
///
/// Returns the element of rank `n / 2`, so even lengths give the upper median.
/// `vals` is used as scratch space and is left partially reordered.
pub fn compute_median(vals: &mut [f64]) -> Option<f64> {
    if vals.is_empty() {
        return None;
    }
    let i_med = vals.len() / 2;
    Some(select_nth(vals, i_med))
}

/// Place the element of rank `k` at index `k` and return it.
///
/// Repeatedly partitions around the midpoint of the current window.
/// Expected O(n), O(n^2) in the worst case.
///
/// # Panics
/// Panics if `k` is not less than `vals.len()`.
pub(crate) fn select_nth(vals: &mut [f64], k: usize) -> f64 {
    assert!(k < vals.len(), "rank {k} out of bounds for {} values", vals.len());

    let mut left = 0;
    let mut right = vals.len() - 1;
    let mut n_rounds = 0usize;
    while left < right {
        n_rounds += 1;
        let i_pivot = partition(vals, left, right, left + (right - left) / 2);
        log::trace!("round {n_rounds}: pivot settled at {i_pivot} in [{left}, {right}]");
        if i_pivot == k {
            return vals[k];
        } else if k < i_pivot {
            right = i_pivot - 1;
        } else {
            left = i_pivot + 1;
        }
    }
    vals[left]
}

/// Partition `vals[left..=right]` around the value at `i_pivot`.
///
/// Moves every element strictly less than the pivot to the front of the window
/// and returns the final index of the pivot.
fn partition(vals: &mut [f64], left: usize, right: usize, i_pivot: usize) -> usize {
    let pivot = vals[i_pivot];
    vals.swap(i_pivot, right);
    let mut i_fill = left;
    for i in left..right {
        if vals[i] < pivot {
            vals.swap(i, i_fill);
            i_fill += 1;
        }
    }
    vals.swap(i_fill, right);
    i_fill
}

/// Compute the most frequent value.
///
/// Ties go to the value that first reached the winning count.
pub fn compute_mode(vals: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    let mut max_freq = 0;
    let mut mode = None;
    for &val in vals {
        let count = counts.entry(freq_key(val)).or_insert(0);
        *count += 1;
        if max_freq < *count {
            max_freq = *count;
            mode = Some(val);
        }
    }
    mode
}

/// Key under which a value is counted: `0.0` and `-0.0` share a key, as do all NaNs.
fn freq_key(val: f64) -> u64 {
    if val == 0.0 {
        0f64.to_bits()
    } else if val.is_nan() {
        f64::NAN.to_bits()
    } else {
        val.to_bits()
    }
}
