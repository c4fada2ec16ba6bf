use anyhow::{bail, ensure};
use std::collections::BTreeMap;

use super::{Classifier, FreshClone};
use crate::domain::{FeatureMatrix, Label};

/// Assigns each row to the class whose training centroid is nearest in
/// squared Euclidean distance. Ties go to the smaller label.
#[derive(Debug, Clone, Default)]
pub struct NearestCentroid {
    centroids: Option<BTreeMap<Label, Vec<f64>>>,
}

impl NearestCentroid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.centroids.is_some()
    }

    pub fn centroid(&self, label: Label) -> Option<&[f64]> {
        self.centroids.as_ref()?.get(&label).map(Vec::as_slice)
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl Classifier for NearestCentroid {
    fn fit(&mut self, features: &FeatureMatrix, labels: &[Label]) -> anyhow::Result<()> {
        ensure!(
            features.n_rows() == labels.len(),
            "{} feature rows but {} labels",
            features.n_rows(),
            labels.len()
        );
        ensure!(!labels.is_empty(), "cannot fit on zero rows");

        let width = features.n_columns();
        let mut sums: BTreeMap<Label, (Vec<f64>, usize)> = BTreeMap::new();
        for (row, &label) in features.rows().zip(labels) {
            let (sum, count) = sums.entry(label).or_insert_with(|| (vec![0.0; width], 0));
            for (s, v) in sum.iter_mut().zip(row) {
                *s += v;
            }
            *count += 1;
        }

        let centroids = sums
            .into_iter()
            .map(|(label, (sum, count))| {
                let n = count as f64;
                (label, sum.into_iter().map(|s| s / n).collect())
            })
            .collect();
        self.centroids = Some(centroids);
        Ok(())
    }

    fn predict(&self, features: &FeatureMatrix) -> anyhow::Result<Vec<Label>> {
        let Some(centroids) = &self.centroids else {
            bail!("NearestCentroid::predict called before fit");
        };

        let mut predictions = Vec::with_capacity(features.n_rows());
        for row in features.rows() {
            let mut best: Option<(Label, f64)> = None;
            for (&label, centroid) in centroids {
                let d = squared_distance(row, centroid);
                if best.map_or(true, |(_, best_d)| d < best_d) {
                    best = Some((label, d));
                }
            }
            match best {
                Some((label, _)) => predictions.push(label),
                None => bail!("NearestCentroid has no classes"),
            }
        }
        Ok(predictions)
    }

    fn name(&self) -> &str {
        "nearest_centroid"
    }
}

impl FreshClone for NearestCentroid {
    fn fresh_clone(&self) -> Self {
        Self::new()
    }
}
