//! Domain types for drifter

pub mod boundary;
pub mod dataset;
pub mod label;

pub use boundary::{LowerBoundaries, PerformanceBoundary};
pub use dataset::{Dataset, DatasetError, FeatureMatrix};
pub use label::{ClassScores, Label, LabelSet};
