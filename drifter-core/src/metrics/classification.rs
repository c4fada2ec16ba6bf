//! Precision, recall and F1 from label predictions.
//!
//! Conventions:
//! - a zero denominator scores 0.0;
//! - `Average::Binary` scores `pos_label` only and rejects more than two
//!   present labels;
//! - the other modes use `opts.labels` or the sorted union of true and
//!   predicted labels.

use super::counts::{check_inputs, label_counts, present_labels, LabelCounts};
use super::{Average, ScoreError, ScoreOptions};
use crate::domain::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Precision,
    Recall,
    F1,
}

impl Kind {
    fn from_counts(self, tp: f64, fp: f64, fn_: f64) -> f64 {
        let (num, den) = match self {
            Self::Precision => (tp, tp + fp),
            Self::Recall => (tp, tp + fn_),
            Self::F1 => (2.0 * tp, 2.0 * tp + fp + fn_),
        };
        if den > 0.0 {
            num / den
        } else {
            0.0
        }
    }
}

/// Precision: `tp / (tp + fp)`.
pub fn precision(y_true: &[Label], y_pred: &[Label], opts: &ScoreOptions) -> Result<f64, ScoreError> {
    score(Kind::Precision, y_true, y_pred, opts)
}

/// Recall: `tp / (tp + fn)`.
pub fn recall(y_true: &[Label], y_pred: &[Label], opts: &ScoreOptions) -> Result<f64, ScoreError> {
    score(Kind::Recall, y_true, y_pred, opts)
}

/// F1: harmonic mean of precision and recall, `2tp / (2tp + fp + fn)`.
pub fn f1(y_true: &[Label], y_pred: &[Label], opts: &ScoreOptions) -> Result<f64, ScoreError> {
    score(Kind::F1, y_true, y_pred, opts)
}

fn score(kind: Kind, y_true: &[Label], y_pred: &[Label], opts: &ScoreOptions) -> Result<f64, ScoreError> {
    let weights = opts.sample_weight.as_deref();
    check_inputs(y_true, y_pred, weights)?;

    let labels = match opts.average {
        Average::Binary => {
            let present = present_labels(y_true, y_pred);
            if present.len() > 2 {
                return Err(ScoreError::BinaryAverageOnMulticlass {
                    n_labels: present.len(),
                });
            }
            if present.len() == 2 && !present.contains(&opts.pos_label) {
                return Err(ScoreError::PosLabelNotPresent {
                    pos_label: opts.pos_label,
                    present,
                });
            }
            vec![opts.pos_label]
        }
        _ => opts
            .labels
            .clone()
            .unwrap_or_else(|| present_labels(y_true, y_pred)),
    };

    let counts = label_counts(y_true, y_pred, &labels, weights);
    Ok(combine(kind, &counts, opts.average))
}

fn combine(kind: Kind, counts: &[LabelCounts], average: Average) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }

    match average {
        Average::Micro => {
            let tp: f64 = counts.iter().map(|c| c.true_positives).sum();
            let fp: f64 = counts.iter().map(|c| c.false_positives).sum();
            let fn_: f64 = counts.iter().map(|c| c.false_negatives).sum();
            kind.from_counts(tp, fp, fn_)
        }
        Average::Binary | Average::Macro => {
            counts
                .iter()
                .map(|c| kind.from_counts(c.true_positives, c.false_positives, c.false_negatives))
                .sum::<f64>()
                / counts.len() as f64
        }
        Average::Weighted => {
            let total: f64 = counts.iter().map(|c| c.support).sum();
            if total <= 0.0 {
                return 0.0;
            }
            counts
                .iter()
                .map(|c| {
                    kind.from_counts(c.true_positives, c.false_positives, c.false_negatives)
                        * c.support
                })
                .sum::<f64>()
                / total
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Y_TRUE: [Label; 9] = [0, 0, 1, 1, 2, 2, 0, 1, 2];
    const Y_PRED: [Label; 9] = [0, 1, 1, 2, 2, 0, 0, 1, 2];

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn macro_scores_three_classes() {
        let opts = ScoreOptions::with_average(Average::Macro);
        assert!(approx(precision(&Y_TRUE, &Y_PRED, &opts).unwrap(), 2.0 / 3.0));
        assert!(approx(recall(&Y_TRUE, &Y_PRED, &opts).unwrap(), 2.0 / 3.0));
        assert!(approx(f1(&Y_TRUE, &Y_PRED, &opts).unwrap(), 2.0 / 3.0));
    }

    #[test]
    fn micro_equals_accuracy_for_single_label_predictions() {
        let opts = ScoreOptions::with_average(Average::Micro);
        let acc = 6.0 / 9.0;
        assert!(approx(precision(&Y_TRUE, &Y_PRED, &opts).unwrap(), acc));
        assert!(approx(recall(&Y_TRUE, &Y_PRED, &opts).unwrap(), acc));
        assert!(approx(f1(&Y_TRUE, &Y_PRED, &opts).unwrap(), acc));
    }

    #[test]
    fn binary_scores_positive_label() {
        // tp = 2, fp = 1, fn = 1
        let y_true = [1, 1, 1, 0, 0];
        let y_pred = [1, 1, 0, 1, 0];
        let opts = ScoreOptions::default();
        assert!(approx(precision(&y_true, &y_pred, &opts).unwrap(), 2.0 / 3.0));
        assert!(approx(recall(&y_true, &y_pred, &opts).unwrap(), 2.0 / 3.0));

        let opts = ScoreOptions::default().pos_label(0);
        assert!(approx(precision(&y_true, &y_pred, &opts).unwrap(), 0.5));
        assert!(approx(recall(&y_true, &y_pred, &opts).unwrap(), 0.5));
    }

    #[test]
    fn binary_rejects_three_labels() {
        let err = precision(&Y_TRUE, &Y_PRED, &ScoreOptions::default()).unwrap_err();
        assert_eq!(err, ScoreError::BinaryAverageOnMulticlass { n_labels: 3 });
    }

    #[test]
    fn binary_rejects_unknown_pos_label() {
        let err = recall(&[0, 2, 2], &[0, 0, 2], &ScoreOptions::default()).unwrap_err();
        assert!(matches!(err, ScoreError::PosLabelNotPresent { pos_label: 1, .. }));
    }

    #[test]
    fn zero_division_scores_zero() {
        // Nothing predicted positive and nothing truly positive.
        let opts = ScoreOptions::default();
        assert_eq!(precision(&[0, 0], &[0, 0], &opts).unwrap(), 0.0);
        assert_eq!(recall(&[0, 0], &[0, 0], &opts).unwrap(), 0.0);
        assert_eq!(f1(&[0, 0], &[0, 0], &opts).unwrap(), 0.0);
    }

    #[test]
    fn weighted_average_uses_support() {
        // class 0: support 3, recall 1.0; class 1: support 1, recall 0.0
        let y_true = [0, 0, 0, 1];
        let y_pred = [0, 0, 0, 0];
        let opts = ScoreOptions::with_average(Average::Weighted);
        assert!(approx(recall(&y_true, &y_pred, &opts).unwrap(), 0.75));
    }

    #[test]
    fn explicit_labels_restrict_macro() {
        let opts = ScoreOptions::with_average(Average::Macro).labels(vec![0]);
        // class 0: tp 2, fp 1
        assert!(approx(precision(&Y_TRUE, &Y_PRED, &opts).unwrap(), 2.0 / 3.0));
    }

    #[test]
    fn sample_weight_shifts_score() {
        let y_true = [1, 1, 0];
        let y_pred = [1, 0, 0];
        let opts = ScoreOptions::default().sample_weight(vec![3.0, 1.0, 1.0]);
        assert!(approx(recall(&y_true, &y_pred, &opts).unwrap(), 0.75));
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = f1(&[1, 0], &[1], &ScoreOptions::default()).unwrap_err();
        assert_eq!(err, ScoreError::LengthMismatch { y_true: 2, y_pred: 1 });
    }
}
