//! Pass/fail policies over fold score sequences.
//!
//! Every policy is a pure function. An empty sequence passes: there is no
//! score to reject.

use std::collections::BTreeMap;
use tracing::debug;

use drifter_core::domain::{ClassScores, Label};

use super::stats::{mean, CenterSpread, SpreadMethod};

/// Fails iff any score is strictly below `boundary`.
pub fn lower_boundary(scores: &[f64], boundary: f64) -> bool {
    match scores.iter().position(|&s| s < boundary) {
        Some(fold) => {
            debug!(fold, score = scores[fold], boundary, "score below lower boundary");
            false
        }
        None => true,
    }
}

/// Fails iff any score deviates from the sequence mean by more than
/// `tolerance`. The mean includes the score being tested.
pub fn mean_deviation(scores: &[f64], tolerance: f64) -> bool {
    let avg = mean(scores);
    match scores.iter().position(|&s| (s - avg).abs() > tolerance) {
        Some(fold) => {
            debug!(fold, score = scores[fold], mean = avg, tolerance, "score deviates from fold mean");
            false
        }
        None => true,
    }
}

/// One-sided spread test: fails iff any score is strictly below
/// `center - spread * tolerance`. Unusually good scores never fail.
pub fn spread_tolerance(scores: &[f64], tolerance: f64, method: SpreadMethod) -> bool {
    let summary = CenterSpread::compute(scores, method);
    let floor = summary.floor(tolerance);
    match scores.iter().position(|&s| s < floor) {
        Some(fold) => {
            debug!(
                fold,
                score = scores[fold],
                center = summary.center,
                spread = summary.spread,
                %method,
                tolerance,
                "score below spread floor"
            );
            false
        }
        None => true,
    }
}

/// Fails iff the mean score is strictly below `minimum_center`.
pub fn average_floor(scores: &[f64], minimum_center: f64) -> bool {
    if scores.is_empty() {
        return true;
    }
    let avg = mean(scores);
    if avg < minimum_center {
        debug!(mean = avg, minimum_center, "fold mean below minimum");
        return false;
    }
    true
}

/// Regroup per-fold class maps into one score sequence per class.
pub fn scores_by_class(per_fold: &[ClassScores]) -> BTreeMap<Label, Vec<f64>> {
    let mut by_class: BTreeMap<Label, Vec<f64>> = BTreeMap::new();
    for fold in per_fold {
        for (&class, &score) in fold {
            by_class.entry(class).or_default().push(score);
        }
    }
    by_class
}

/// Mean-deviation test per class; every class must pass.
pub fn per_class_anomaly_detection(per_fold: &[ClassScores], tolerance: f64) -> bool {
    let mut passed = true;
    for (class, scores) in scores_by_class(per_fold) {
        if !mean_deviation(&scores, tolerance) {
            debug!(class, "class failed mean-deviation check");
            passed = false;
        }
    }
    passed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_boundary_is_strict() {
        assert!(lower_boundary(&[0.9, 0.95, 0.9], 0.9));
        assert!(!lower_boundary(&[0.9, 0.899, 0.95], 0.9));
        assert!(lower_boundary(&[], 0.9));
    }

    #[test]
    fn mean_deviation_flags_outlier() {
        // mean 0.85, the 0.7 fold deviates by 0.15
        let scores = [0.9, 0.9, 0.9, 0.7];
        assert!(!mean_deviation(&scores, 0.1));
        assert!(mean_deviation(&scores, 0.15 + 1e-9));
    }

    #[test]
    fn constant_scores_pass_at_zero_tolerance() {
        assert!(mean_deviation(&[0.1; 3], 0.0));
        assert!(mean_deviation(&[0.85; 10], 0.0));
        for method in [SpreadMethod::Mean, SpreadMethod::Median, SpreadMethod::Trimean] {
            assert!(spread_tolerance(&[0.1; 3], 0.0, method));
        }
        let folds: Vec<ClassScores> = vec![[(0, 0.7), (1, 0.1)].into_iter().collect(); 5];
        assert!(per_class_anomaly_detection(&folds, 0.0));
    }

    #[test]
    fn spread_tolerance_is_one_sided() {
        // mean 0.8, population std ~0.082
        let low_outlier = [0.9, 0.8, 0.7];
        assert!(spread_tolerance(&low_outlier, 1.5, SpreadMethod::Mean));
        assert!(!spread_tolerance(&low_outlier, 1.0, SpreadMethod::Mean));

        // a single high outlier never fails
        let high_outlier = [0.5, 0.5, 0.5, 0.99];
        assert!(spread_tolerance(&high_outlier, 0.0, SpreadMethod::Median));
    }

    #[test]
    fn average_floor_compares_mean() {
        assert!(average_floor(&[0.8, 0.9], 0.85));
        assert!(!average_floor(&[0.8, 0.89], 0.85));
    }

    #[test]
    fn per_class_requires_every_class() {
        let steady = |v: f64| -> ClassScores { [(0, 0.9), (1, v)].into_iter().collect() };
        let folds = vec![steady(0.9), steady(0.5), steady(0.9)];
        assert!(!per_class_anomaly_detection(&folds, 0.1));

        let calm = vec![steady(0.8), steady(0.82), steady(0.81)];
        assert!(per_class_anomaly_detection(&calm, 0.1));
    }

    #[test]
    fn scores_by_class_keeps_fold_order() {
        let folds: Vec<ClassScores> = vec![
            [(3, 0.1), (4, 0.2)].into_iter().collect(),
            [(3, 0.3), (4, 0.4)].into_iter().collect(),
        ];
        let grouped = scores_by_class(&folds);
        assert_eq!(grouped[&3], vec![0.1, 0.3]);
        assert_eq!(grouped[&4], vec![0.2, 0.4]);
    }
}
