//! Score wrappers with an identity short-circuit.
//!
//! When the prediction vector equals the truth vector element for element,
//! these return 1.0 without consulting the underlying score. That avoids the
//! zero-division path of, say, precision on a fold where the positive class
//! is absent from both vectors. Any difference at all falls through to the
//! plain score with the same options.

use super::classification;
use super::{ScoreError, ScoreOptions};
use crate::domain::Label;

fn identical(y_true: &[Label], y_pred: &[Label]) -> bool {
    y_true == y_pred
}

pub fn precision_score(
    y_true: &[Label],
    y_pred: &[Label],
    opts: &ScoreOptions,
) -> Result<f64, ScoreError> {
    if identical(y_true, y_pred) {
        return Ok(1.0);
    }
    classification::precision(y_true, y_pred, opts)
}

pub fn recall_score(
    y_true: &[Label],
    y_pred: &[Label],
    opts: &ScoreOptions,
) -> Result<f64, ScoreError> {
    if identical(y_true, y_pred) {
        return Ok(1.0);
    }
    classification::recall(y_true, y_pred, opts)
}

pub fn f1_score(y_true: &[Label], y_pred: &[Label], opts: &ScoreOptions) -> Result<f64, ScoreError> {
    if identical(y_true, y_pred) {
        return Ok(1.0);
    }
    classification::f1(y_true, y_pred, opts)
}
