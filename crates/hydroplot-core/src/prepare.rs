// File: crates/hydroplot-core/src/prepare.rs
// Summary: Series preparation pipeline; pure helpers that shape sample sequences into plotted points.

use chrono::{DateTime, Utc};

use crate::error::{PlotError, Result};
use crate::types::Point;

/// What [`pair_points`] does with a NaN y value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NanPolicy {
    /// Keep NaN; the renderer breaks the line there.
    #[default]
    PassThrough,
    /// Replace NaN with 0.0.
    Zero,
}

/// Zip `xs` and `ys` positionally into points.
///
/// Fails with [`PlotError::LengthMismatch`] when the lengths differ; nothing is
/// produced in that case.
pub fn pair_points(xs: &[f64], ys: &[f64], policy: NanPolicy) -> Result<Vec<Point>> {
    check_lengths(xs.len(), ys.len())?;
    Ok(xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| match policy {
            NanPolicy::Zero if y.is_nan() => (x, 0.0),
            _ => (x, y),
        })
        .collect())
}

/// Zip timestamps and values; x is seconds since the Unix epoch (UTC).
pub fn pair_dated_points(dates: &[DateTime<Utc>], ys: &[f64]) -> Result<Vec<Point>> {
    check_lengths(dates.len(), ys.len())?;
    Ok(dates.iter().zip(ys).map(|(d, &y)| (d.timestamp() as f64, y)).collect())
}

/// Values that are strictly positive and finite, in their original order.
pub fn filter_positive_finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|&v| is_positive_finite(v)).collect()
}

/// In-place form of [`filter_positive_finite`].
pub fn retain_positive_finite(values: &mut Vec<f64>) {
    values.retain(|&v| is_positive_finite(v));
}

#[inline]
fn is_positive_finite(v: f64) -> bool {
    v > 0.0 && v.is_finite()
}

/// Number the finite values consecutively from zero, skipping NaN gaps.
///
/// x is the position among the retained values, not the original index, so a
/// gappy record draws as one continuous trace.
pub fn sequential_line(values: &[f64]) -> Vec<Point> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .enumerate()
        .map(|(k, v)| (k as f64, v))
        .collect()
}

/// Flow-duration style curve: positive values in descending order against a
/// percent-exceedance x axis.
///
/// x for the value at position `i` is `i / (n / 100)` where `n` is the number
/// of values left after [`filter_positive_finite`].
pub fn cumulative_distribution_line(values: &[f64]) -> Vec<Point> {
    let mut v = filter_positive_finite(values);
    debug_assert!(v.iter().all(|x| !x.is_nan()));
    v.sort_by(f64::total_cmp);
    v.reverse();
    let per_cent = v.len() as f64 / 100.0;
    v.into_iter()
        .enumerate()
        .map(|(i, y)| (i as f64 / per_cent, y))
        .collect()
}

/// Keep the pairs where both values are present and not both zero.
///
/// Used ahead of one-to-one comparisons, where (0, 0) pairs from dry periods
/// would pile up in the corner.
pub fn drop_empty_pairs(xs: &[f64], ys: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    check_lengths(xs.len(), ys.len())?;
    Ok(xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| (x, y))
        .filter(|&(x, y)| !(x.is_nan() || y.is_nan()))
        .filter(|&(x, y)| !(x == 0.0 && y == 0.0))
        .unzip())
}

pub(crate) fn check_lengths(xs: usize, ys: usize) -> Result<()> {
    if xs != ys {
        return Err(PlotError::LengthMismatch { xs, ys });
    }
    Ok(())
}
