use anyhow::{bail, ensure};
use std::collections::BTreeMap;

use super::{Classifier, FreshClone};
use crate::domain::{FeatureMatrix, Label};

/// Baseline that predicts the most frequent training label for every row.
/// Ties go to the smaller label.
#[derive(Debug, Clone, Default)]
pub struct MajorityClass {
    label: Option<Label>,
}

impl MajorityClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> Option<Label> {
        self.label
    }
}

impl Classifier for MajorityClass {
    fn fit(&mut self, features: &FeatureMatrix, labels: &[Label]) -> anyhow::Result<()> {
        ensure!(
            features.n_rows() == labels.len(),
            "{} feature rows but {} labels",
            features.n_rows(),
            labels.len()
        );

        let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
        for &label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        // max_by_key keeps the last maximum, so walk labels in reverse
        self.label = counts
            .into_iter()
            .rev()
            .max_by_key(|&(_, count)| count)
            .map(|(label, _)| label);

        ensure!(self.label.is_some(), "cannot fit on zero rows");
        Ok(())
    }

    fn predict(&self, features: &FeatureMatrix) -> anyhow::Result<Vec<Label>> {
        match self.label {
            Some(label) => Ok(vec![label; features.n_rows()]),
            None => bail!("MajorityClass::predict called before fit"),
        }
    }

    fn name(&self) -> &str {
        "majority_class"
    }
}

impl FreshClone for MajorityClass {
    fn fresh_clone(&self) -> Self {
        Self::new()
    }
}
