//! Drifter Runner: model validation on top of `drifter-core`.
//!
//! This crate provides:
//! - Averaging policy and the ROC AUC binary guard
//! - Resampling layer (cross-validated scores, per-class scores, out-of-fold predictions)
//! - Decision policies (lower boundary, mean deviation, spread tolerance, per-class anomaly)
//! - Single-model classification suite with latency stress tests
//! - Two-model comparison engine

pub mod averaging;
pub mod comparison;
pub mod config;
pub mod decision;
pub mod error;
pub mod resampling;
pub mod stress;
pub mod suite;

pub use averaging::AveragingPolicy;
pub use comparison::{not_worse_per_class, ClassifierComparison};
pub use config::{ConfigError, FoldStrategy, Folds, SuiteConfig};
pub use decision::{CenterSpread, SpreadMethod};
pub use error::SuiteError;
pub use resampling::{cross_val_predict, cross_validate, per_class_cross_val, predict_all};
pub use suite::{ClassificationSuite, Thresholds};
