//! Prediction latency stress tests.
//!
//! Each scenario draws `sample_size` rows with replacement and times one
//! `predict` call. Timing is measured after the call returns; a slow call is
//! never interrupted.

use anyhow::Context;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use drifter_core::classifier::Classifier;
use drifter_core::domain::{Dataset, FeatureMatrix, PerformanceBoundary};
use drifter_core::rng::RngHierarchy;

use crate::error::SuiteError;

/// Sample for scenario `index`. Scenario samples are independent of each
/// other and of how many scenarios precede them.
fn scenario_sample(
    data: &Dataset,
    rng: &RngHierarchy,
    index: usize,
    sample_size: usize,
) -> Result<FeatureMatrix, SuiteError> {
    let mut scenario_rng = rng.rng_for("stress", index as u64);
    Ok(data.sample_features(sample_size, &mut scenario_rng)?)
}

/// Wall time of one `predict` call on `features`.
pub fn time_predict<C: Classifier + ?Sized>(clf: &C, features: &FeatureMatrix) -> Result<Duration, SuiteError> {
    let start = Instant::now();
    clf.predict(features)
        .with_context(|| format!("{} failed to predict {} sampled rows", clf.name(), features.n_rows()))?;
    Ok(start.elapsed())
}

/// Passes iff every scenario's predict call finishes within its budget.
/// Stops at the first scenario over budget.
pub fn run_time_stress_test<C: Classifier + ?Sized>(
    clf: &C,
    data: &Dataset,
    boundaries: &[PerformanceBoundary],
    rng: &RngHierarchy,
) -> Result<bool, SuiteError> {
    for (index, boundary) in boundaries.iter().enumerate() {
        let sample = scenario_sample(data, rng, index, boundary.sample_size)?;
        let elapsed = time_predict(clf, &sample)?;
        if elapsed > boundary.budget() {
            warn!(
                sample_size = boundary.sample_size,
                elapsed_secs = elapsed.as_secs_f64(),
                max_run_time = boundary.max_run_time,
                "prediction exceeded run time budget"
            );
            return Ok(false);
        }
        debug!(
            sample_size = boundary.sample_size,
            elapsed_secs = elapsed.as_secs_f64(),
            "prediction within budget"
        );
    }
    Ok(true)
}

/// Passes iff model one is never slower than model two on the same sample.
/// Only `sample_size` of each boundary is used.
pub fn two_model_prediction_run_time_stress_test<A, B>(
    clf_one: &A,
    clf_two: &B,
    data: &Dataset,
    boundaries: &[PerformanceBoundary],
    rng: &RngHierarchy,
) -> Result<bool, SuiteError>
where
    A: Classifier + ?Sized,
    B: Classifier + ?Sized,
{
    for (index, boundary) in boundaries.iter().enumerate() {
        let sample = scenario_sample(data, rng, index, boundary.sample_size)?;
        let one = time_predict(clf_one, &sample)?;
        let two = time_predict(clf_two, &sample)?;
        if one > two {
            warn!(
                sample_size = boundary.sample_size,
                model_one_secs = one.as_secs_f64(),
                model_two_secs = two.as_secs_f64(),
                "model one predicted slower than model two"
            );
            return Ok(false);
        }
    }
    Ok(true)
}
