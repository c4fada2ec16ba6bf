//! Class labels and the label set derived from a target column.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Class label.
///
/// Labels are integers; string-valued targets are expected to be encoded
/// before a dataset is built.
pub type Label = i64;

/// Per-class score map (class label -> score).
pub type ClassScores = BTreeMap<Label, f64>;

/// The distinct classes present in a target column.
///
/// Computed once when a dataset is built and used to drive every per-class
/// loop. Iteration is ascending, but nothing depends on the order: each class
/// is processed independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    classes: BTreeSet<Label>,
}

impl LabelSet {
    pub fn from_labels(labels: &[Label]) -> Self {
        Self {
            classes: labels.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// True iff exactly two classes are present.
    pub fn is_binary(&self) -> bool {
        self.classes.len() == 2
    }

    pub fn contains(&self, label: Label) -> bool {
        self.classes.contains(&label)
    }

    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        self.classes.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Label> {
        self.iter().collect()
    }
}

impl FromIterator<Label> for LabelSet {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}
