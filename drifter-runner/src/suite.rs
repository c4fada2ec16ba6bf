//! Single-model test suite.
//!
//! Every check resolves the requested averaging mode once on entry (with the
//! ROC AUC guard for ROC AUC), runs a resampling or predict pass, and reduces
//! the scores with a decision policy. `Ok(false)` means the model failed the
//! check; `Err` means the check could not run.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use drifter_core::classifier::{Classifier, FreshClone};
use drifter_core::domain::{ClassScores, Dataset, Label, LabelSet, LowerBoundaries, PerformanceBoundary};
use drifter_core::metrics::{Average, Metric, ScoreOptions};
use drifter_core::rng::RngHierarchy;

use crate::averaging::AveragingPolicy;
use crate::config::SuiteConfig;
use crate::decision::{self, SpreadMethod};
use crate::error::SuiteError;
use crate::resampling;
use crate::stress;

// ─── Thresholds ──────────────────────────────────────────────────────

/// One threshold per label-count metric, for the composite checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Thresholds {
    pub fn new(precision: f64, recall: f64, f1: f64) -> Self {
        Self {
            precision,
            recall,
            f1,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Each label-count metric paired with its threshold, in the order
    /// composite checks run them.
    pub fn by_metric(&self) -> [(Metric, f64); 3] {
        [
            (Metric::Precision, self.precision),
            (Metric::Recall, self.recall),
            (Metric::F1, self.f1),
        ]
    }
}

// ─── Suite ───────────────────────────────────────────────────────────

/// Checks for one classifier against one test dataset.
///
/// Holds shared references only: the caller's classifier is read for
/// predict-only checks and cloned (never refitted) for resampling checks.
pub struct ClassificationSuite<'a, C: ?Sized> {
    clf: &'a C,
    data: &'a Dataset,
    config: SuiteConfig,
    policy: AveragingPolicy,
}

impl<'a, C: Classifier + ?Sized> ClassificationSuite<'a, C> {
    pub fn new(clf: &'a C, data: &'a Dataset) -> Self {
        Self {
            clf,
            data,
            config: SuiteConfig::default(),
            policy: AveragingPolicy::new(data.classes()),
        }
    }

    pub fn with_config(mut self, config: SuiteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        self.data
    }

    pub fn classes(&self) -> &LabelSet {
        self.data.classes()
    }

    pub fn is_binary(&self) -> bool {
        self.policy.is_binary()
    }

    pub fn reset_average(&self, average: Average) -> Average {
        self.policy.reset_average(average)
    }

    pub fn roc_auc_guard(&self) -> Result<(), SuiteError> {
        self.policy.roc_auc_guard()
    }

    /// Resolve `average` for `metric` and bundle it with the configured
    /// positive label.
    fn options(&self, metric: Metric, average: Average) -> Result<ScoreOptions, SuiteError> {
        let resolved = self.policy.resolve(metric, average)?;
        Ok(ScoreOptions::with_average(resolved).pos_label(self.config.pos_label))
    }

    // ─── Single predict pass ─────────────────────────────────────────

    /// Per-class scores of the caller's fitted model on the whole dataset.
    pub fn per_class_scores(&self, metric: Metric, average: Average) -> Result<ClassScores, SuiteError> {
        let opts = self.options(metric, average)?;
        let y_pred = resampling::predict_all(self.clf, self.data)?;
        Ok(metric.per_class(self.data.labels(), &y_pred, self.data.classes(), &opts)?)
    }

    /// Fails iff some class scores strictly below its boundary.
    pub fn lower_boundary_per_class(
        &self,
        metric: Metric,
        boundaries: &LowerBoundaries,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let opts = self.options(metric, average)?;
        let y_pred = resampling::predict_all(self.clf, self.data)?;
        self.check_per_class(metric, &y_pred, boundaries, &opts)
    }

    fn check_per_class(
        &self,
        metric: Metric,
        y_pred: &[Label],
        boundaries: &LowerBoundaries,
        opts: &ScoreOptions,
    ) -> Result<bool, SuiteError> {
        let scores = metric.per_class(self.data.labels(), y_pred, self.data.classes(), opts)?;
        for (&class, &score) in &scores {
            let boundary = boundaries
                .get(class)
                .ok_or(SuiteError::MissingBoundary { class })?;
            if score < boundary {
                debug!(%metric, class, score, boundary, "class below lower boundary");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Per-class precision, recall and F1 lower-boundary checks on one
    /// predict pass; all three must pass.
    pub fn classifier_testing(
        &self,
        precision: &LowerBoundaries,
        recall: &LowerBoundaries,
        f1: &LowerBoundaries,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let y_pred = resampling::predict_all(self.clf, self.data)?;
        let mut passed = true;
        for (metric, boundaries) in [
            (Metric::Precision, precision),
            (Metric::Recall, recall),
            (Metric::F1, f1),
        ] {
            let opts = self.options(metric, average)?;
            passed &= self.check_per_class(metric, &y_pred, boundaries, &opts)?;
        }
        info!(passed, %average, "classifier_testing");
        Ok(passed)
    }

    /// Latency check of the caller's fitted model, see [`stress`].
    pub fn run_time_stress_test(&self, boundaries: &[PerformanceBoundary]) -> Result<bool, SuiteError> {
        let rng = RngHierarchy::new(self.config.sample_seed);
        let passed = stress::run_time_stress_test(self.clf, self.data, boundaries, &rng)?;
        info!(passed, scenarios = boundaries.len(), "run_time_stress_test");
        Ok(passed)
    }
}

impl<'a, C: FreshClone> ClassificationSuite<'a, C> {
    // ─── Fold-generator path ─────────────────────────────────────────

    /// One score per fold, from the configured fold strategy with `cv`
    /// splits.
    pub fn cross_val_scores(&self, metric: Metric, cv: usize, average: Average) -> Result<Vec<f64>, SuiteError> {
        let opts = self.options(metric, average)?;
        let folds = self.config.fold_strategy.folds(cv);
        resampling::cross_validate(self.clf, self.data, metric, &opts, &folds)
    }

    /// Fails iff any fold scores strictly below `boundary`.
    pub fn cross_val_lower_boundary(
        &self,
        metric: Metric,
        boundary: f64,
        cv: usize,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let scores = self.cross_val_scores(metric, cv, average)?;
        Ok(decision::lower_boundary(&scores, boundary))
    }

    /// Fails iff any fold deviates from the fold mean by more than
    /// `tolerance`.
    pub fn cross_val_anomaly_detection(
        &self,
        metric: Metric,
        tolerance: f64,
        cv: usize,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let scores = self.cross_val_scores(metric, cv, average)?;
        Ok(decision::mean_deviation(&scores, tolerance))
    }

    /// Fails iff the mean fold score is below `minimum_center`.
    pub fn cross_val_average(
        &self,
        metric: Metric,
        minimum_center: f64,
        cv: usize,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let scores = self.cross_val_scores(metric, cv, average)?;
        Ok(decision::average_floor(&scores, minimum_center))
    }

    /// Fails iff any fold is below `center - spread * tolerance`.
    pub fn spread_cross_val_anomaly_detection(
        &self,
        metric: Metric,
        tolerance: f64,
        method: SpreadMethod,
        cv: usize,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let scores = self.cross_val_scores(metric, cv, average)?;
        Ok(decision::spread_tolerance(&scores, tolerance, method))
    }

    /// Precision, recall and F1 fold lower-boundary checks; all three must
    /// pass.
    pub fn cross_val_classifier_testing(
        &self,
        boundaries: Thresholds,
        cv: usize,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let mut passed = true;
        for (metric, boundary) in boundaries.by_metric() {
            passed &= self.cross_val_lower_boundary(metric, boundary, cv, average)?;
        }
        info!(passed, cv, %average, "cross_val_classifier_testing");
        Ok(passed)
    }

    /// Precision, recall and F1 spread checks with one tolerance each; all
    /// three must pass.
    pub fn spread_cross_val_classifier_testing(
        &self,
        tolerances: Thresholds,
        method: SpreadMethod,
        cv: usize,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let mut passed = true;
        for (metric, tolerance) in tolerances.by_metric() {
            passed &= self.spread_cross_val_anomaly_detection(metric, tolerance, method, cv, average)?;
        }
        info!(passed, cv, %method, %average, "spread_cross_val_classifier_testing");
        Ok(passed)
    }

    // ─── Explicit per-class path ─────────────────────────────────────

    /// Per-fold class score maps from seeded, shuffled k-fold.
    pub fn per_class_cross_val(
        &self,
        metric: Metric,
        cv: usize,
        average: Average,
    ) -> Result<Vec<ClassScores>, SuiteError> {
        let opts = self.options(metric, average)?;
        resampling::per_class_cross_val(self.clf, self.data, metric, &opts, cv, self.config.per_class_seed)
    }

    /// Mean-deviation check per class over the shuffled folds; every class
    /// must pass.
    pub fn cross_val_per_class_anomaly_detection(
        &self,
        metric: Metric,
        tolerance: f64,
        cv: usize,
        average: Average,
    ) -> Result<bool, SuiteError> {
        let per_fold = self.per_class_cross_val(metric, cv, average)?;
        let passed = decision::per_class_anomaly_detection(&per_fold, tolerance);
        info!(passed, %metric, cv, "cross_val_per_class_anomaly_detection");
        Ok(passed)
    }
}
