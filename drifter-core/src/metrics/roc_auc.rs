//! ROC AUC from label predictions.
//!
//! Predictions are hard labels, so each row's score for a class is 1.0 when
//! the predicted label equals that class and 0.0 otherwise. The curve is
//! walked over distinct score thresholds and integrated with the trapezoidal
//! rule, which gives ties half credit.

use std::cmp::Ordering;

use super::counts::check_inputs;
use super::{Average, ScoreError, ScoreOptions};
use crate::domain::Label;

/// Area under the ROC curve for boolean truth and real-valued scores.
///
/// Fails when the truth has no positive or no negative rows (by weight).
pub fn binary_roc_auc(
    truth: &[bool],
    scores: &[f64],
    sample_weight: Option<&[f64]>,
) -> Result<f64, ScoreError> {
    let weight = |i: usize| sample_weight.map_or(1.0, |w| w[i]);

    let total_pos: f64 = (0..truth.len()).filter(|&i| truth[i]).map(weight).sum();
    let total_neg: f64 = (0..truth.len()).filter(|&i| !truth[i]).map(weight).sum();
    if total_pos <= 0.0 || total_neg <= 0.0 {
        return Err(ScoreError::SingleClassRocAuc);
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    let mut auc = 0.0;
    let (mut tp, mut fp) = (0.0_f64, 0.0_f64);
    let (mut prev_tpr, mut prev_fpr) = (0.0_f64, 0.0_f64);

    let mut i = 0;
    while i < order.len() {
        let threshold = scores[order[i]];
        while i < order.len() && scores[order[i]] == threshold {
            let row = order[i];
            if truth[row] {
                tp += weight(row);
            } else {
                fp += weight(row);
            }
            i += 1;
        }
        let tpr = tp / total_pos;
        let fpr = fp / total_neg;
        auc += (fpr - prev_fpr) * (tpr + prev_tpr) / 2.0;
        prev_tpr = tpr;
        prev_fpr = fpr;
    }

    Ok(auc)
}

/// One-vs-rest AUC for `class`: truth is `y_true == class`, score is
/// `y_pred == class`.
pub fn one_vs_rest_roc_auc(
    y_true: &[Label],
    y_pred: &[Label],
    class: Label,
    sample_weight: Option<&[f64]>,
) -> Result<f64, ScoreError> {
    check_inputs(y_true, y_pred, sample_weight)?;
    let (truth, scores) = indicator(y_true, y_pred, class);
    binary_roc_auc(&truth, &scores, sample_weight)
}

/// ROC AUC of label predictions.
///
/// With two classes in `y_true` the larger label is the positive class and
/// `average` is ignored. With more classes the score is one-vs-rest and
/// `average` picks macro, weighted or micro (pooled) aggregation; binary
/// averaging is rejected.
pub fn roc_auc(y_true: &[Label], y_pred: &[Label], opts: &ScoreOptions) -> Result<f64, ScoreError> {
    let weights = opts.sample_weight.as_deref();
    check_inputs(y_true, y_pred, weights)?;

    let classes = match &opts.labels {
        Some(labels) => labels.clone(),
        None => super::counts::present_labels(y_true, &[]),
    };

    if classes.len() < 2 {
        return Err(ScoreError::SingleClassRocAuc);
    }

    if classes.len() == 2 {
        let positive = classes[1];
        let (truth, scores) = indicator(y_true, y_pred, positive);
        return binary_roc_auc(&truth, &scores, weights);
    }

    match opts.average {
        Average::Binary => Err(ScoreError::UnsupportedAverage {
            metric: "roc_auc",
            average: Average::Binary,
        }),
        Average::Macro => {
            let mut total = 0.0;
            for &class in &classes {
                total += one_vs_rest_roc_auc(y_true, y_pred, class, weights)?;
            }
            Ok(total / classes.len() as f64)
        }
        Average::Weighted => {
            let mut weighted = 0.0;
            let mut support_total = 0.0;
            for &class in &classes {
                let support: f64 = y_true
                    .iter()
                    .enumerate()
                    .filter(|(_, &t)| t == class)
                    .map(|(i, _)| weights.map_or(1.0, |w| w[i]))
                    .sum();
                weighted += one_vs_rest_roc_auc(y_true, y_pred, class, weights)? * support;
                support_total += support;
            }
            if support_total <= 0.0 {
                return Err(ScoreError::SingleClassRocAuc);
            }
            Ok(weighted / support_total)
        }
        Average::Micro => {
            let n = y_true.len();
            let mut truth = Vec::with_capacity(n * classes.len());
            let mut scores = Vec::with_capacity(n * classes.len());
            let mut pooled_weights = weights.map(|_| Vec::with_capacity(n * classes.len()));
            for &class in &classes {
                let (t, s) = indicator(y_true, y_pred, class);
                truth.extend(t);
                scores.extend(s);
                if let (Some(pooled), Some(w)) = (pooled_weights.as_mut(), weights) {
                    pooled.extend_from_slice(w);
                }
            }
            binary_roc_auc(&truth, &scores, pooled_weights.as_deref())
        }
    }
}

fn indicator(y_true: &[Label], y_pred: &[Label], class: Label) -> (Vec<bool>, Vec<f64>) {
    let truth = y_true.iter().map(|&t| t == class).collect();
    let scores = y_pred
        .iter()
        .map(|&p| if p == class { 1.0 } else { 0.0 })
        .collect();
    (truth, scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn perfect_scores_give_one() {
        let auc = binary_roc_auc(&[true, true, false, false], &[0.9, 0.8, 0.2, 0.1], None).unwrap();
        assert!(approx(auc, 1.0));
    }

    #[test]
    fn reversed_scores_give_zero() {
        let auc = binary_roc_auc(&[true, false], &[0.1, 0.9], None).unwrap();
        assert!(approx(auc, 0.0));
    }

    #[test]
    fn ties_get_half_credit() {
        let auc = binary_roc_auc(&[true, false], &[0.5, 0.5], None).unwrap();
        assert!(approx(auc, 0.5));
    }

    #[test]
    fn continuous_scores_match_pair_counting() {
        // pairs (pos, neg): (0.8,0.3) (0.8,0.6) (0.4,0.3) (0.4,0.6) -> 3 of 4 ordered
        let auc = binary_roc_auc(&[true, false, true, false], &[0.8, 0.3, 0.4, 0.6], None).unwrap();
        assert!(approx(auc, 0.75));
    }

    #[test]
    fn single_class_truth_is_degenerate() {
        assert_eq!(
            binary_roc_auc(&[true, true], &[0.1, 0.2], None),
            Err(ScoreError::SingleClassRocAuc)
        );
        assert_eq!(
            roc_auc(&[2, 2, 2], &[2, 1, 2], &ScoreOptions::default()),
            Err(ScoreError::SingleClassRocAuc)
        );
    }

    #[test]
    fn binary_labels_use_larger_label_as_positive() {
        // positive = 1: tpr = 1/2, fpr = 0 -> auc = 0.75
        let auc = roc_auc(&[1, 1, 0, 0], &[1, 0, 0, 0], &ScoreOptions::default()).unwrap();
        assert!(approx(auc, 0.75));
    }

    #[test]
    fn multiclass_macro_averages_one_vs_rest() {
        let y_true = [0, 0, 1, 1, 2, 2];
        let y_pred = [0, 0, 1, 1, 2, 2];
        let opts = ScoreOptions::with_average(Average::Macro);
        assert!(approx(roc_auc(&y_true, &y_pred, &opts).unwrap(), 1.0));

        let micro = ScoreOptions::with_average(Average::Micro);
        assert!(approx(roc_auc(&y_true, &y_pred, &micro).unwrap(), 1.0));
    }

    #[test]
    fn multiclass_rejects_binary_average() {
        let err = roc_auc(&[0, 1, 2], &[0, 1, 2], &ScoreOptions::default()).unwrap_err();
        assert!(matches!(err, ScoreError::UnsupportedAverage { metric: "roc_auc", .. }));
    }

    #[test]
    fn one_vs_rest_on_full_set() {
        // class 0: truth [T,T,F,F], hits [T,F,F,F] -> tpr 0.5, fpr 0 -> 0.75
        let auc = one_vs_rest_roc_auc(&[0, 0, 1, 2], &[0, 1, 1, 2], 0, None).unwrap();
        assert!(approx(auc, 0.75));
    }
}
