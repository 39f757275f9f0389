//! # Confidence Interval Calculations
//!
//! Percentile intervals over a sorted sample of estimates.

use serde::Serialize;
use std::fmt;

/// A two-sided confidence interval, or the undefined interval with NaN bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    /// The lower bound of the confidence interval
    pub lower: f64,
    /// The upper bound of the confidence interval
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// The interval reported when too few estimates are available.
    pub fn undefined() -> Self {
        Self {
            lower: f64::NAN,
            upper: f64::NAN,
        }
    }

    /// Whether both bounds are real numbers.
    pub fn is_defined(&self) -> bool {
        !self.lower.is_nan() && !self.upper.is_nan()
    }

    /// Whether `value` lies within the closed interval. Always false when undefined.
    pub fn contains(&self, value: f64) -> bool {
        self.is_defined() && self.lower <= value && value <= self.upper
    }

    /// Distance between the bounds, NaN when undefined.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            write!(f, "[{:.6}, {:.6}]", self.lower, self.upper)
        } else {
            write!(f, "undefined")
        }
    }
}

/// Percentile interval of an ascending-sorted sample.
///
/// The bounds are `sorted[floor(lower_q * n)]` and `sorted[ceil(upper_q * n)]`,
/// with indices clamped to the sample. Fewer than `min_count` values (or an
/// empty sample) give the undefined interval.
///
/// # Arguments
///
/// * `sorted` - Estimates in ascending order
/// * `lower_q` - Lower quantile, e.g. 0.025
/// * `upper_q` - Upper quantile, e.g. 0.975
/// * `min_count` - Minimum sample size for a defined interval
pub fn percentile_interval(
    sorted: &[f64],
    lower_q: f64,
    upper_q: f64,
    min_count: usize,
) -> ConfidenceInterval {
    let n = sorted.len();
    if n == 0 || n < min_count {
        return ConfidenceInterval::undefined();
    }

    let last = n - 1;
    let lower_idx = ((lower_q * n as f64).floor() as usize).min(last);
    let upper_idx = ((upper_q * n as f64).ceil() as usize).min(last);

    ConfidenceInterval::new(sorted[lower_idx], sorted[upper_idx])
}
