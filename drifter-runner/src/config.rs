//! Serializable suite configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use drifter_core::domain::Label;
use drifter_core::folds::{Fold, FoldError, FoldGenerator, KFold, StratifiedKFold};

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fold generator used by the aggregate cross-validation path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldStrategy {
    /// Stratified k-fold in dataset order.
    #[default]
    Stratified,
    /// Plain k-fold in dataset order.
    Kfold,
}

/// A configured fold generator. Lets one call site pick the strategy at
/// runtime without boxing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Folds {
    Stratified(StratifiedKFold),
    Plain(KFold),
}

impl FoldGenerator for Folds {
    fn n_splits(&self) -> usize {
        match self {
            Self::Stratified(f) => f.n_splits(),
            Self::Plain(f) => f.n_splits(),
        }
    }

    fn split(&self, labels: &[Label]) -> Result<Vec<Fold>, FoldError> {
        match self {
            Self::Stratified(f) => f.split(labels),
            Self::Plain(f) => f.split(labels),
        }
    }
}

impl FoldStrategy {
    pub fn folds(self, cv: usize) -> Folds {
        match self {
            Self::Stratified => Folds::Stratified(StratifiedKFold::new(cv)),
            Self::Kfold => Folds::Plain(KFold::new(cv)),
        }
    }
}

/// Knobs shared by every check of a suite.
///
/// ```toml
/// per_class_seed = 42
/// pos_label = 1
/// sample_seed = 0
/// fold_strategy = "stratified"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Shuffle seed of the per-class k-fold path.
    pub per_class_seed: u64,
    /// Positive class when a binary average is scored.
    pub pos_label: Label,
    /// Master seed for stress-test row sampling.
    pub sample_seed: u64,
    pub fold_strategy: FoldStrategy,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            per_class_seed: 42,
            pos_label: 1,
            sample_seed: 0,
            fold_strategy: FoldStrategy::Stratified,
        }
    }
}

impl SuiteConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_fold_strategy(mut self, strategy: FoldStrategy) -> Self {
        self.fold_strategy = strategy;
        self
    }

    pub fn with_pos_label(mut self, pos_label: Label) -> Self {
        self.pos_label = pos_label;
        self
    }

    pub fn with_sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = seed;
        self
    }
}
