//! Errors from the validation engine.

use thiserror::Error;

use drifter_core::domain::{DatasetError, Label};
use drifter_core::folds::FoldError;
use drifter_core::metrics::ScoreError;

/// Reasons a check could not run.
///
/// A check that ran and did not pass returns `Ok(false)`; these variants are
/// reserved for "could not decide".
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("metric error: {0}")]
    Score(#[from] ScoreError),
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("fold error: {0}")]
    Fold(#[from] FoldError),
    /// Failure raised by a classifier's `fit` or `predict`.
    #[error(transparent)]
    Classifier(#[from] anyhow::Error),
    #[error("no lower boundary configured for class {class}")]
    MissingBoundary { class: Label },
    #[error("ROC AUC checks are only available for multiclass problems; this dataset has two classes")]
    RocAucOnBinary,
    #[error("cross-validated predictions left row {row} unpredicted")]
    IncompletePredictions { row: usize },
}
