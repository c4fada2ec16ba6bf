//! Summary statistics of a fold score sequence.
//!
//! Empty input yields 0.0 everywhere, matching how the policies treat an
//! empty sequence as vacuously passing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shared value of a non-empty sequence whose elements are all equal.
fn constant_value(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    values.iter().all(|&v| v == first).then_some(first)
}

/// Arithmetic mean. Exact for a constant sequence: summing n copies of a
/// value and dividing by n can land an ulp away from it.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    if let Some(value) = constant_value(values) {
        return value;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Quantile `q` in [0, 1], linearly interpolated between order statistics.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&q), "quantile must be in [0, 1]");

    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// Interquartile range, Q3 - Q1.
pub fn iqr(values: &[f64]) -> f64 {
    quantile(values, 0.75) - quantile(values, 0.25)
}

/// Trimean: (Q1 + 2 * median + Q3) / 4.
pub fn trimean(values: &[f64]) -> f64 {
    if let Some(value) = constant_value(values) {
        return value;
    }
    (quantile(values, 0.25) + 2.0 * median(values) + quantile(values, 0.75)) / 4.0
}

/// Mean absolute deviation from the trimean.
pub fn trimean_absolute_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let center = trimean(values);
    values.iter().map(|v| (v - center).abs()).sum::<f64>() / values.len() as f64
}

/// Which (center, spread) pair summarizes a score sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadMethod {
    /// Mean and population standard deviation.
    #[default]
    Mean,
    /// Median and interquartile range.
    Median,
    /// Trimean and mean absolute deviation from it.
    Trimean,
}

impl fmt::Display for SpreadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Trimean => "trimean",
        };
        f.write_str(name)
    }
}

/// Center and spread of a score sequence.
///
/// # Example
/// ```
/// use drifter_runner::decision::{CenterSpread, SpreadMethod};
///
/// let scores = vec![0.80, 0.82, 0.84, 0.86, 0.88];
/// let summary = CenterSpread::compute(&scores, SpreadMethod::Median);
///
/// assert!((summary.center - 0.84).abs() < 1e-12);
/// assert!((summary.spread - 0.04).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterSpread {
    pub method: SpreadMethod,
    pub center: f64,
    pub spread: f64,
}

impl CenterSpread {
    pub fn compute(values: &[f64], method: SpreadMethod) -> Self {
        let (center, spread) = match method {
            SpreadMethod::Mean => (mean(values), std_dev(values)),
            SpreadMethod::Median => (median(values), iqr(values)),
            SpreadMethod::Trimean => (trimean(values), trimean_absolute_deviation(values)),
        };
        Self {
            method,
            center,
            spread,
        }
    }

    /// Lowest score that is not anomalous at `tolerance` spreads below the
    /// center.
    pub fn floor(&self, tolerance: f64) -> f64 {
        self.center - self.spread * tolerance
    }
}

/// `(center, spread)` of `values` under `method`.
pub fn describe_scores(values: &[f64], method: SpreadMethod) -> (f64, f64) {
    let summary = CenterSpread::compute(values, method);
    (summary.center, summary.spread)
}
