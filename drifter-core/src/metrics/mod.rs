//! Classification metrics computed from label predictions.
//!
//! `classification` and `roc_auc` hold the plain scores; `fixed` wraps the
//! label-count scores with the identity short-circuit; `Metric` selects one.

pub mod average;
pub mod classification;
pub mod counts;
pub mod error;
pub mod fixed;
pub mod metric;
pub mod roc_auc;

pub use average::{Average, ScoreOptions};
pub use classification::{f1, precision, recall};
pub use counts::{label_counts, present_labels, LabelCounts};
pub use error::ScoreError;
pub use fixed::{f1_score, precision_score, recall_score};
pub use metric::Metric;
pub use roc_auc::{binary_roc_auc, one_vs_rest_roc_auc, roc_auc};
