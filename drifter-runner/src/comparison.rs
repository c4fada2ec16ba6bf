//! Two-model comparison engine.
//!
//! Model one passes when, on every compared metric and every class, its
//! score is not strictly below model two's. Precision, recall and F1 are
//! always compared; ROC AUC joins them on binary problems only, with a
//! binary average re-resolved to micro for that metric.

use tracing::{debug, info};

use drifter_core::classifier::{Classifier, FreshClone};
use drifter_core::domain::{ClassScores, Dataset, Label, PerformanceBoundary};
use drifter_core::metrics::{Average, Metric, ScoreOptions};
use drifter_core::rng::RngHierarchy;

use crate::averaging::AveragingPolicy;
use crate::config::SuiteConfig;
use crate::error::SuiteError;
use crate::resampling;
use crate::stress;

/// True iff no class of `one` scores strictly below the same class of
/// `two`.
pub fn not_worse_per_class(metric: Metric, one: &ClassScores, two: &ClassScores) -> bool {
    for (&class, &score_one) in one {
        if let Some(&score_two) = two.get(&class) {
            if score_one < score_two {
                debug!(%metric, class, score_one, score_two, "model one scores lower");
                return false;
            }
        }
    }
    true
}

/// Compares `clf_one` against `clf_two` on one dataset.
pub struct ClassifierComparison<'a, A: ?Sized, B: ?Sized> {
    clf_one: &'a A,
    clf_two: &'a B,
    data: &'a Dataset,
    config: SuiteConfig,
    policy: AveragingPolicy,
}

impl<'a, A, B> ClassifierComparison<'a, A, B>
where
    A: Classifier + ?Sized,
    B: Classifier + ?Sized,
{
    pub fn new(clf_one: &'a A, clf_two: &'a B, data: &'a Dataset) -> Self {
        Self {
            clf_one,
            clf_two,
            data,
            config: SuiteConfig::default(),
            policy: AveragingPolicy::new(data.classes()),
        }
    }

    pub fn with_config(mut self, config: SuiteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn is_binary(&self) -> bool {
        self.policy.is_binary()
    }

    pub fn reset_average(&self, average: Average) -> Average {
        self.policy.reset_average(average)
    }

    /// Metrics in the verdict: ROC AUC only for binary problems.
    pub fn compared_metrics(&self) -> Vec<Metric> {
        let mut metrics = Metric::CLASSIFICATION.to_vec();
        if self.is_binary() {
            metrics.push(Metric::RocAuc);
        }
        metrics
    }

    /// `average` is expected to be reset already. ROC AUC never takes the
    /// binary average, so it is re-resolved to micro here without the
    /// single-model guard.
    fn options(&self, metric: Metric, average: Average) -> ScoreOptions {
        let average = if metric == Metric::RocAuc && average == Average::Binary {
            Average::Micro
        } else {
            average
        };
        ScoreOptions::with_average(average).pos_label(self.config.pos_label)
    }

    fn per_class_verdict(&self, y_one: &[Label], y_two: &[Label], average: Average) -> Result<bool, SuiteError> {
        let average = self.reset_average(average);
        let y_true = self.data.labels();
        let classes = self.data.classes();

        let mut passed = true;
        for metric in self.compared_metrics() {
            let opts = self.options(metric, average);
            let one = metric.per_class(y_true, y_one, classes, &opts)?;
            let two = metric.per_class(y_true, y_two, classes, &opts)?;
            passed &= not_worse_per_class(metric, &one, &two);
        }
        Ok(passed)
    }

    /// Per-class comparison of the two fitted models' predictions.
    pub fn two_model_classifier_testing(&self, average: Average) -> Result<bool, SuiteError> {
        let y_one = resampling::predict_all(self.clf_one, self.data)?;
        let y_two = resampling::predict_all(self.clf_two, self.data)?;
        let passed = self.per_class_verdict(&y_one, &y_two, average)?;
        info!(passed, %average, binary = self.is_binary(), "two_model_classifier_testing");
        Ok(passed)
    }

    /// Model one must not be slower than model two on any sample size.
    pub fn two_model_prediction_run_time_stress_test(
        &self,
        boundaries: &[PerformanceBoundary],
    ) -> Result<bool, SuiteError> {
        let rng = RngHierarchy::new(self.config.sample_seed);
        let passed =
            stress::two_model_prediction_run_time_stress_test(self.clf_one, self.clf_two, self.data, boundaries, &rng)?;
        info!(passed, scenarios = boundaries.len(), "two_model_prediction_run_time_stress_test");
        Ok(passed)
    }
}

impl<'a, A: FreshClone, B: FreshClone> ClassifierComparison<'a, A, B> {
    /// Out-of-fold predictions of both models, from the configured fold
    /// strategy with `cv` splits.
    fn cross_val_predictions(&self, cv: usize) -> Result<(Vec<Label>, Vec<Label>), SuiteError> {
        let folds = self.config.fold_strategy.folds(cv);
        let y_one = resampling::cross_val_predict(self.clf_one, self.data, &folds)?;
        let y_two = resampling::cross_val_predict(self.clf_two, self.data, &folds)?;
        Ok((y_one, y_two))
    }

    /// Per-class comparison on cross-validated predictions. ROC AUC, when
    /// included, uses the same cross-validated predictions.
    pub fn cross_val_per_class_two_model_classifier_testing(
        &self,
        cv: usize,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let (y_one, y_two) = self.cross_val_predictions(cv)?;
        let passed = self.per_class_verdict(&y_one, &y_two, average)?;
        info!(passed, cv, %average, "cross_val_per_class_two_model_classifier_testing");
        Ok(passed)
    }

    /// Aggregate comparison on cross-validated predictions.
    pub fn cross_val_two_model_classifier_testing(&self, cv: usize, average: Average) -> Result<bool, SuiteError> {
        let (y_one, y_two) = self.cross_val_predictions(cv)?;
        let average = self.reset_average(average);
        let y_true = self.data.labels();

        let mut passed = true;
        for metric in self.compared_metrics() {
            let opts = self.options(metric, average);
            let one = metric.score(y_true, &y_one, &opts)?;
            let two = metric.score(y_true, &y_two, &opts)?;
            if one < two {
                debug!(%metric, score_one = one, score_two = two, "model one scores lower");
                passed = false;
            }
        }
        info!(passed, cv, %average, "cross_val_two_model_classifier_testing");
        Ok(passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(Label, f64)]) -> ClassScores {
        entries.iter().copied().collect()
    }

    #[test]
    fn equal_scores_are_not_worse() {
        let a = map(&[(0, 0.8), (1, 0.9)]);
        assert!(not_worse_per_class(Metric::F1, &a, &a));
    }

    #[test]
    fn one_strict_deficit_fails() {
        let one = map(&[(0, 0.95), (1, 0.89)]);
        let two = map(&[(0, 0.80), (1, 0.90)]);
        assert!(!not_worse_per_class(Metric::Recall, &one, &two));
        assert!(not_worse_per_class(Metric::Recall, &two, &map(&[(0, 0.5), (1, 0.5)])));
    }
}
