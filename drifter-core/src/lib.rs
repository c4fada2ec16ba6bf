//! Drifter Core: domain types, metrics, folds and classifier traits.
//!
//! This crate holds the collaborators the validation engine calls into:
//! - Dataset container with label set and feature matrix
//! - Classifier traits plus reference models
//! - Precision, recall, F1 and ROC AUC with averaging modes
//! - Cross-validation fold generators
//! - Deterministic RNG hierarchy

pub mod classifier;
pub mod domain;
pub mod folds;
pub mod metrics;
pub mod rng;
