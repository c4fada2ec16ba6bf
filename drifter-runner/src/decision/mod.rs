//! Decision layer: reduce fold scores to a pass/fail verdict.

mod policies;
mod stats;

pub use policies::{
    average_floor, lower_boundary, mean_deviation, per_class_anomaly_detection, scores_by_class,
    spread_tolerance,
};
pub use stats::{
    describe_scores, iqr, mean, median, quantile, std_dev, trimean, trimean_absolute_deviation,
    CenterSpread, SpreadMethod,
};
