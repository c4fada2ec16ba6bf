//! BDD tests for the single-model classification suite
//!
//! These tests verify the suite against a lookup model whose predictions
//! are fixed per row:
//! - Per-class lower boundaries on one predict pass
//! - Cross-validated boundary, average and spread checks
//! - ROC AUC guard on binary problems
//! - Per-class anomaly detection over shuffled folds

use std::collections::BTreeMap;

use drifter_core::classifier::{Classifier, FreshClone};
use drifter_core::domain::{Dataset, FeatureMatrix, Label, LowerBoundaries, PerformanceBoundary};
use drifter_core::metrics::{Average, Metric};
use drifter_runner::{ClassificationSuite, SpreadMethod, SuiteConfig, SuiteError, Thresholds};

/// Predicts a fixed label per row id (feature column 0). Fitting is a no-op,
/// so every cross-validation fold sees the same answers.
#[derive(Debug, Clone)]
struct Lookup {
    answers: BTreeMap<i64, Label>,
}

impl Lookup {
    fn perfect(data: &Dataset) -> Self {
        let answers = data
            .labels()
            .iter()
            .enumerate()
            .map(|(row, &label)| (row as i64, label))
            .collect();
        Self { answers }
    }

    fn with_answer(mut self, row: usize, label: Label) -> Self {
        self.answers.insert(row as i64, label);
        self
    }
}

impl Classifier for Lookup {
    fn fit(&mut self, _: &FeatureMatrix, _: &[Label]) -> anyhow::Result<()> {
        Ok(())
    }

    fn predict(&self, features: &FeatureMatrix) -> anyhow::Result<Vec<Label>> {
        features
            .rows()
            .map(|row| {
                let id = row[0] as i64;
                self.answers
                    .get(&id)
                    .copied()
                    .ok_or_else(|| anyhow::anyhow!("no answer for row {id}"))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "lookup"
    }
}

impl FreshClone for Lookup {
    fn fresh_clone(&self) -> Self {
        self.clone()
    }
}

/// `n` rows with labels cycling through `n_classes` classes.
fn dataset(n: usize, n_classes: i64) -> Dataset {
    let labels: Vec<Label> = (0..n as i64).map(|i| i % n_classes).collect();
    let row_id: Vec<f64> = (0..n).map(|i| i as f64).collect();
    Dataset::from_columns("target", labels, vec![("row_id".into(), row_id)]).unwrap()
}

/// First `count` rows of class 0 answered as class 1.
fn misread_class_zero(data: &Dataset, count: usize) -> Lookup {
    data.rows_with_label(0)
        .into_iter()
        .take(count)
        .fold(Lookup::perfect(data), |clf, row| clf.with_answer(row, 1))
}

#[test]
fn bdd_scenario_perfect_model_passes_per_class_boundaries() {
    // GIVEN 100 rows over 3 classes and a model that answers every row
    let data = dataset(100, 3);
    let clf = Lookup::perfect(&data);
    let suite = ClassificationSuite::new(&clf, &data);

    // WHEN every class must reach 0.9 on precision, recall and F1
    let boundaries = LowerBoundaries::uniform(data.classes(), 0.9);
    let passed = suite
        .classifier_testing(&boundaries, &boundaries, &boundaries, Average::Binary)
        .unwrap();

    // THEN the suite passes
    assert!(passed);
}

#[test]
fn bdd_scenario_misread_rows_fail_only_their_class() {
    // GIVEN a model that misreads 5 rows of class 0 as class 1
    let data = dataset(100, 3);
    let clf = misread_class_zero(&data, 5);
    let suite = ClassificationSuite::new(&clf, &data);

    // WHEN the per-class checks run at 0.9
    let boundaries = LowerBoundaries::uniform(data.classes(), 0.9);
    let passed = suite
        .classifier_testing(&boundaries, &boundaries, &boundaries, Average::Binary)
        .unwrap();

    // THEN the suite fails
    assert!(!passed);

    // AND only class 0 loses recall
    let recall = suite.per_class_scores(Metric::Recall, Average::Binary).unwrap();
    assert!((recall[&0] - 29.0 / 34.0).abs() < 1e-12);
    assert_eq!(recall[&1], 1.0);
    assert_eq!(recall[&2], 1.0);
}

#[test]
fn bdd_scenario_cross_validated_checks_follow_fold_scores() {
    // GIVEN a perfect model on a multiclass dataset
    let data = dataset(90, 3);
    let clf = Lookup::perfect(&data);
    let suite = ClassificationSuite::new(&clf, &data);

    // WHEN every cross-validated check runs
    let boundary = suite
        .cross_val_classifier_testing(Thresholds::uniform(0.95), 5, Average::Binary)
        .unwrap();
    let spread = suite
        .spread_cross_val_classifier_testing(Thresholds::uniform(1.0), SpreadMethod::Median, 5, Average::Macro)
        .unwrap();
    let floor = suite.cross_val_average(Metric::F1, 0.99, 3, Average::Weighted).unwrap();
    let steady = suite
        .cross_val_anomaly_detection(Metric::Precision, 0.0, 10, Average::Micro)
        .unwrap();

    // THEN all of them pass
    assert!(boundary);
    assert!(spread);
    assert!(floor);
    assert!(steady);

    // AND the caller's model reports ten identical fold scores
    let scores = suite.cross_val_scores(Metric::Recall, 10, Average::Macro).unwrap();
    assert_eq!(scores, vec![1.0; 10]);
}

#[test]
fn bdd_scenario_boundary_above_fold_score_fails() {
    // GIVEN a model with 10 misread class-0 rows
    let data = dataset(90, 3);
    let clf = misread_class_zero(&data, 10);
    let suite = ClassificationSuite::new(&clf, &data);

    // WHEN the micro recall floor is set at the perfect score
    let passed = suite
        .cross_val_lower_boundary(Metric::Recall, 1.0, 3, Average::Micro)
        .unwrap();

    // THEN at least one fold falls below it
    assert!(!passed);

    // AND a floor under the worst fold passes
    assert!(suite
        .cross_val_lower_boundary(Metric::Recall, 0.5, 3, Average::Micro)
        .unwrap());
}

#[test]
fn bdd_scenario_roc_auc_guard_blocks_binary_problems() {
    // GIVEN a binary dataset
    let data = dataset(40, 2);
    let clf = Lookup::perfect(&data);
    let suite = ClassificationSuite::new(&clf, &data);

    // WHEN a ROC AUC check is requested
    let err = suite
        .cross_val_lower_boundary(Metric::RocAuc, 0.5, 4, Average::Binary)
        .unwrap_err();

    // THEN the guard refuses before any fold is fitted
    assert!(matches!(err, SuiteError::RocAucOnBinary));
    assert!(matches!(
        suite.per_class_scores(Metric::RocAuc, Average::Micro),
        Err(SuiteError::RocAucOnBinary)
    ));
}

#[test]
fn bdd_scenario_roc_auc_runs_on_multiclass_problems() {
    // GIVEN three classes
    let data = dataset(60, 3);
    let clf = Lookup::perfect(&data);
    let suite = ClassificationSuite::new(&clf, &data);

    // WHEN ROC AUC checks run with a binary request
    let boundary = suite
        .cross_val_lower_boundary(Metric::RocAuc, 0.99, 3, Average::Binary)
        .unwrap();
    let per_class = suite.per_class_scores(Metric::RocAuc, Average::Macro).unwrap();

    // THEN the request is reset and every score is perfect
    assert!(boundary);
    assert_eq!(per_class.values().copied().collect::<Vec<_>>(), vec![1.0; 3]);
}

#[test]
fn bdd_scenario_uneven_class_errors_trip_per_class_anomaly() {
    // GIVEN one model that is always right and one that misreads 5 rows of
    // class 0 (34 rows of class 0 cannot split evenly over 5 folds)
    let data = dataset(100, 3);
    let perfect = Lookup::perfect(&data);
    let noisy = misread_class_zero(&data, 5);

    // WHEN per-class recall must not drift from its mean at all
    let steady = ClassificationSuite::new(&perfect, &data)
        .cross_val_per_class_anomaly_detection(Metric::Recall, 0.0, 5, Average::Micro)
        .unwrap();
    let drifting = ClassificationSuite::new(&noisy, &data)
        .cross_val_per_class_anomaly_detection(Metric::Recall, 0.0, 5, Average::Micro)
        .unwrap();

    // THEN the perfect model passes and the noisy one fails
    assert!(steady);
    assert!(!drifting);
}

#[test]
fn bdd_scenario_per_class_folds_replay_under_a_seed() {
    // GIVEN the same model under the same per-class seed
    let data = dataset(100, 3);
    let clf = misread_class_zero(&data, 7);
    let config = SuiteConfig {
        per_class_seed: 7,
        ..SuiteConfig::default()
    };
    let suite = ClassificationSuite::new(&clf, &data).with_config(config);

    // WHEN the per-class cross validation runs twice
    let first = suite.per_class_cross_val(Metric::Recall, 4, Average::Micro).unwrap();
    let second = suite.per_class_cross_val(Metric::Recall, 4, Average::Micro).unwrap();

    // THEN the fold maps are identical
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn bdd_scenario_fast_model_passes_stress_test() {
    // GIVEN a lookup model and generous budgets
    let data = dataset(100, 3);
    let clf = Lookup::perfect(&data);
    let suite = ClassificationSuite::new(&clf, &data);
    let budgets = [
        PerformanceBoundary::new(100, 5.0),
        PerformanceBoundary::new(1_000, 5.0),
    ];

    // WHEN the stress test runs
    let passed = suite.run_time_stress_test(&budgets).unwrap();

    // THEN every sample finishes in time
    assert!(passed);
}
