//! Cross-validation fold generators.
//!
//! A generator partitions row indices `0..n` into `n_splits` folds. Across
//! all folds every row appears in exactly one test set; a fold's train set
//! is every row not in its test set.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::Label;
use crate::rng::RngHierarchy;

// ─── Types ───────────────────────────────────────────────────────────

/// One train/test partition of the rows, both sides sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Fold {
    fn from_test(mut test: Vec<usize>, n_samples: usize) -> Self {
        test.sort_unstable();
        let mut in_test = vec![false; n_samples];
        for &i in &test {
            in_test[i] = true;
        }
        let train = (0..n_samples).filter(|&i| !in_test[i]).collect();
        Self { train, test }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    #[error("cross-validation needs at least 2 splits, got {n_splits}")]
    TooFewSplits { n_splits: usize },

    #[error("cannot split {n_samples} samples into {n_splits} folds")]
    MoreSplitsThanSamples { n_splits: usize, n_samples: usize },

    #[error("fold {fold} has an empty test set; every class has fewer than {n_splits} members")]
    EmptyTestFold { fold: usize, n_splits: usize },
}

/// Produces cross-validation folds for a label vector.
pub trait FoldGenerator {
    fn n_splits(&self) -> usize;

    fn split(&self, labels: &[Label]) -> Result<Vec<Fold>, FoldError>;
}

/// Sizes of `n_splits` consecutive chunks of `n` items: the first
/// `n % n_splits` chunks get one extra item.
fn chunk_sizes(n: usize, n_splits: usize) -> Vec<usize> {
    let base = n / n_splits;
    let extra = n % n_splits;
    (0..n_splits).map(|i| base + usize::from(i < extra)).collect()
}

fn check_splits(n_splits: usize, n_samples: usize) -> Result<(), FoldError> {
    if n_splits < 2 {
        return Err(FoldError::TooFewSplits { n_splits });
    }
    if n_splits > n_samples {
        return Err(FoldError::MoreSplitsThanSamples {
            n_splits,
            n_samples,
        });
    }
    Ok(())
}

// ─── KFold ───────────────────────────────────────────────────────────

/// Plain k-fold: consecutive chunks of the (optionally shuffled) row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KFold {
    n_splits: usize,
    /// Shuffle seed; `None` keeps dataset order.
    seed: Option<u64>,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            seed: None,
        }
    }

    /// Shuffle rows before chunking. The permutation is a pure function of
    /// `seed` and the number of rows.
    pub fn shuffled(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl FoldGenerator for KFold {
    fn n_splits(&self) -> usize {
        self.n_splits
    }

    fn split(&self, labels: &[Label]) -> Result<Vec<Fold>, FoldError> {
        let n = labels.len();
        check_splits(self.n_splits, n)?;

        let mut order: Vec<usize> = (0..n).collect();
        if let Some(seed) = self.seed {
            let mut rng = RngHierarchy::new(seed).rng_for("kfold", 0);
            order.shuffle(&mut rng);
        }

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for size in chunk_sizes(n, self.n_splits) {
            let test = order[start..start + size].to_vec();
            folds.push(Fold::from_test(test, n));
            start += size;
        }
        Ok(folds)
    }
}

// ─── StratifiedKFold ─────────────────────────────────────────────────

/// Stratified k-fold without shuffling.
///
/// Each class's rows, in dataset order, are cut into `n_splits` consecutive
/// chunks; fold i tests on chunk i of every class. Class proportions in each
/// test set therefore track the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StratifiedKFold {
    n_splits: usize,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }
}

impl FoldGenerator for StratifiedKFold {
    fn n_splits(&self) -> usize {
        self.n_splits
    }

    fn split(&self, labels: &[Label]) -> Result<Vec<Fold>, FoldError> {
        let n = labels.len();
        check_splits(self.n_splits, n)?;

        let mut by_class: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
        for (row, &label) in labels.iter().enumerate() {
            by_class.entry(label).or_default().push(row);
        }

        let mut tests: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];
        for rows in by_class.values() {
            let mut start = 0;
            for (fold, size) in chunk_sizes(rows.len(), self.n_splits).into_iter().enumerate() {
                tests[fold].extend_from_slice(&rows[start..start + size]);
                start += size;
            }
        }

        if let Some(fold) = tests.iter().position(Vec::is_empty) {
            return Err(FoldError::EmptyTestFold {
                fold,
                n_splits: self.n_splits,
            });
        }

        Ok(tests.into_iter().map(|test| Fold::from_test(test, n)).collect())
    }
}
