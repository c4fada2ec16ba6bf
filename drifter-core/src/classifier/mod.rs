//! Classifier traits and two small reference models.
//!
//! The validation engine never owns a model. It borrows the caller's fitted
//! instance for predict-only checks and asks for a fresh, unfitted copy
//! whenever it needs to train: a refit never touches the caller's instance.

pub mod majority;
pub mod nearest_centroid;

pub use majority::MajorityClass;
pub use nearest_centroid::NearestCentroid;

use crate::domain::{FeatureMatrix, Label};

/// Anything that can be trained on labelled rows and predict labels.
///
/// Errors are `anyhow` so wrappers around other ML stacks can forward
/// whatever their backend raises.
pub trait Classifier {
    fn fit(&mut self, features: &FeatureMatrix, labels: &[Label]) -> anyhow::Result<()>;

    /// One label per row of `features`.
    fn predict(&self, features: &FeatureMatrix) -> anyhow::Result<Vec<Label>>;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// An unfitted copy with identical configuration.
///
/// Required by every path that refits per fold.
pub trait FreshClone: Classifier + Sized {
    fn fresh_clone(&self) -> Self;
}
