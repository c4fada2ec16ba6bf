//! Averaging modes and the shared argument bundle for score functions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Label;

/// How per-label scores are combined into one number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Average {
    /// Score only `pos_label`. Valid when at most two labels are present.
    #[default]
    Binary,
    /// Pool true positives, false positives and false negatives over labels.
    Micro,
    /// Unweighted mean of per-label scores.
    Macro,
    /// Mean of per-label scores weighted by support.
    Weighted,
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Binary => "binary",
            Self::Micro => "micro",
            Self::Macro => "macro",
            Self::Weighted => "weighted",
        };
        f.write_str(name)
    }
}

/// Arguments forwarded to a score function.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOptions {
    /// Labels to include. `None` means the sorted union of true and
    /// predicted labels.
    pub labels: Option<Vec<Label>>,
    /// Positive class for `Average::Binary`.
    pub pos_label: Label,
    pub average: Average,
    /// Per-row weights; `None` weights every row 1.0.
    pub sample_weight: Option<Vec<f64>>,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            labels: None,
            pos_label: 1,
            average: Average::Binary,
            sample_weight: None,
        }
    }
}

impl ScoreOptions {
    pub fn with_average(average: Average) -> Self {
        Self {
            average,
            ..Self::default()
        }
    }

    pub fn labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn pos_label(mut self, pos_label: Label) -> Self {
        self.pos_label = pos_label;
        self
    }

    pub fn sample_weight(mut self, weights: Vec<f64>) -> Self {
        self.sample_weight = Some(weights);
        self
    }
}
