//! Weighted one-vs-rest counts per label.

use std::collections::BTreeSet;

use super::ScoreError;
use crate::domain::Label;

/// True positives, false positives, false negatives and support for one
/// label. Counts are weighted, so they are `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelCounts {
    pub label: Label,
    pub true_positives: f64,
    pub false_positives: f64,
    pub false_negatives: f64,
    /// Weighted number of rows whose true label is `label`.
    pub support: f64,
}

impl LabelCounts {
    fn empty(label: Label) -> Self {
        Self {
            label,
            true_positives: 0.0,
            false_positives: 0.0,
            false_negatives: 0.0,
            support: 0.0,
        }
    }
}

/// Check lengths of the truth, prediction and weight vectors.
pub(crate) fn check_inputs(
    y_true: &[Label],
    y_pred: &[Label],
    sample_weight: Option<&[f64]>,
) -> Result<(), ScoreError> {
    if y_true.len() != y_pred.len() {
        return Err(ScoreError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    if let Some(w) = sample_weight {
        if w.len() != y_true.len() {
            return Err(ScoreError::WeightLengthMismatch {
                expected: y_true.len(),
                actual: w.len(),
            });
        }
    }
    Ok(())
}

/// Sorted union of labels appearing in either vector.
pub fn present_labels(y_true: &[Label], y_pred: &[Label]) -> Vec<Label> {
    y_true
        .iter()
        .chain(y_pred.iter())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Counts for each label in `labels`, in the given order.
///
/// Rows whose true and predicted labels are both outside `labels` do not
/// contribute to anything.
pub fn label_counts(
    y_true: &[Label],
    y_pred: &[Label],
    labels: &[Label],
    sample_weight: Option<&[f64]>,
) -> Vec<LabelCounts> {
    let mut counts: Vec<LabelCounts> = labels.iter().map(|&l| LabelCounts::empty(l)).collect();

    for (row, (&t, &p)) in y_true.iter().zip(y_pred.iter()).enumerate() {
        let w = sample_weight.map_or(1.0, |ws| ws[row]);
        for c in counts.iter_mut() {
            let is_true = t == c.label;
            let is_pred = p == c.label;
            if is_true {
                c.support += w;
            }
            match (is_true, is_pred) {
                (true, true) => c.true_positives += w,
                (false, true) => c.false_positives += w,
                (true, false) => c.false_negatives += w,
                (false, false) => {}
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_three_classes() {
        let y_true = [0, 0, 1, 1, 2, 2, 0, 1, 2];
        let y_pred = [0, 1, 1, 2, 2, 0, 0, 1, 2];
        let counts = label_counts(&y_true, &y_pred, &[0, 1, 2], None);

        assert_eq!(counts[0].true_positives, 2.0);
        assert_eq!(counts[0].false_positives, 1.0);
        assert_eq!(counts[0].false_negatives, 1.0);
        assert_eq!(counts[0].support, 3.0);

        assert_eq!(counts[1].true_positives, 2.0);
        assert_eq!(counts[1].false_positives, 1.0);
        assert_eq!(counts[1].false_negatives, 1.0);
    }

    #[test]
    fn weights_scale_counts() {
        let counts = label_counts(&[1, 1, 0], &[1, 0, 0], &[1], Some(&[2.0, 3.0, 1.0]));
        assert_eq!(counts[0].true_positives, 2.0);
        assert_eq!(counts[0].false_negatives, 3.0);
        assert_eq!(counts[0].support, 5.0);
    }

    #[test]
    fn present_labels_is_sorted_union() {
        assert_eq!(present_labels(&[3, 1], &[2, 1]), vec![1, 2, 3]);
    }

    #[test]
    fn check_inputs_reports_mismatches() {
        assert_eq!(
            check_inputs(&[1, 2], &[1], None),
            Err(ScoreError::LengthMismatch { y_true: 2, y_pred: 1 })
        );
        assert_eq!(
            check_inputs(&[1], &[1], Some(&[1.0, 2.0])),
            Err(ScoreError::WeightLengthMismatch { expected: 1, actual: 2 })
        );
    }
}
