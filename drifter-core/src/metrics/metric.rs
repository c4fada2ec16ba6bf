//! Metric strategy: one enum instead of binding score functions by hand.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::counts::check_inputs;
use super::fixed::{f1_score, precision_score, recall_score};
use super::roc_auc::{one_vs_rest_roc_auc, roc_auc};
use super::{Average, ScoreError, ScoreOptions};
use crate::domain::{ClassScores, Label, LabelSet};

/// The score a check is run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Precision,
    Recall,
    F1,
    RocAuc,
}

impl Metric {
    /// The three label-count metrics, in the order composite checks run them.
    pub const CLASSIFICATION: [Metric; 3] = [Metric::Precision, Metric::Recall, Metric::F1];

    pub fn name(self) -> &'static str {
        match self {
            Self::Precision => "precision",
            Self::Recall => "recall",
            Self::F1 => "f1",
            Self::RocAuc => "roc_auc",
        }
    }

    /// Score with full options. Precision, recall and F1 go through the
    /// identity short-circuit; ROC AUC does not.
    pub fn score(self, y_true: &[Label], y_pred: &[Label], opts: &ScoreOptions) -> Result<f64, ScoreError> {
        match self {
            Self::Precision => precision_score(y_true, y_pred, opts),
            Self::Recall => recall_score(y_true, y_pred, opts),
            Self::F1 => f1_score(y_true, y_pred, opts),
            Self::RocAuc => roc_auc(y_true, y_pred, opts),
        }
    }

    /// Score with default options and the given averaging mode.
    pub fn evaluate(self, y_true: &[Label], y_pred: &[Label], average: Average) -> Result<f64, ScoreError> {
        self.score(y_true, y_pred, &ScoreOptions::with_average(average))
    }

    /// One score per class in `classes`.
    ///
    /// Precision, recall and F1 are evaluated on the rows whose true label is
    /// the class. That slice holds a single true class, which leaves ROC AUC
    /// undefined, so ROC AUC is instead the one-vs-rest AUC of the class over
    /// all rows.
    pub fn per_class(
        self,
        y_true: &[Label],
        y_pred: &[Label],
        classes: &LabelSet,
        opts: &ScoreOptions,
    ) -> Result<ClassScores, ScoreError> {
        let weights = opts.sample_weight.as_deref();
        check_inputs(y_true, y_pred, weights)?;

        let mut scores = ClassScores::new();
        for class in classes.iter() {
            let value = match self {
                Self::RocAuc => one_vs_rest_roc_auc(y_true, y_pred, class, weights)?,
                _ => {
                    let rows: Vec<usize> = (0..y_true.len()).filter(|&i| y_true[i] == class).collect();
                    let class_true: Vec<Label> = rows.iter().map(|&i| y_true[i]).collect();
                    let class_pred: Vec<Label> = rows.iter().map(|&i| y_pred[i]).collect();
                    let mut class_opts = opts.clone();
                    class_opts.sample_weight = weights.map(|w| rows.iter().map(|&i| w[i]).collect());
                    self.score(&class_true, &class_pred, &class_opts)?
                }
            };
            scores.insert(class, value);
        }
        Ok(scores)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
