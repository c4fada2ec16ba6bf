use thiserror::Error;

use super::Average;
use crate::domain::Label;

/// Errors raised by score functions.
///
/// These are degenerate-input failures of the metric itself. Callers see them
/// unchanged; they are never turned into a failing verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("y_true has {y_true} entries but y_pred has {y_pred}")]
    LengthMismatch { y_true: usize, y_pred: usize },

    #[error("sample_weight has {actual} entries, expected {expected}")]
    WeightLengthMismatch { expected: usize, actual: usize },

    #[error("average=binary requires at most 2 labels, found {n_labels}; choose micro, macro or weighted")]
    BinaryAverageOnMulticlass { n_labels: usize },

    #[error("pos_label={pos_label} is not a valid label, present labels are {present:?}")]
    PosLabelNotPresent { pos_label: Label, present: Vec<Label> },

    #[error("only one class present in y_true; ROC AUC is undefined")]
    SingleClassRocAuc,

    #[error("{metric} does not support average={average}")]
    UnsupportedAverage {
        metric: &'static str,
        average: Average,
    },
}
