//! Threshold specifications: per-class lower boundaries and latency budgets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::label::{Label, LabelSet};

/// Minimum acceptable score per class.
///
/// Not validated against the label set up front: a class without an entry
/// only fails when it is looked up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LowerBoundaries(BTreeMap<Label, f64>);

impl LowerBoundaries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same boundary for every class in `classes`.
    pub fn uniform(classes: &LabelSet, boundary: f64) -> Self {
        Self(classes.iter().map(|c| (c, boundary)).collect())
    }

    pub fn with(mut self, class: Label, boundary: f64) -> Self {
        self.0.insert(class, boundary);
        self
    }

    pub fn insert(&mut self, class: Label, boundary: f64) {
        self.0.insert(class, boundary);
    }

    pub fn get(&self, class: Label) -> Option<f64> {
        self.0.get(&class).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Label, f64)> for LowerBoundaries {
    fn from_iter<I: IntoIterator<Item = (Label, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One latency stress scenario: predict on `sample_size` rows within
/// `max_run_time` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBoundary {
    pub sample_size: usize,
    /// Wall-clock budget in seconds.
    pub max_run_time: f64,
}

impl PerformanceBoundary {
    pub fn new(sample_size: usize, max_run_time: f64) -> Self {
        Self {
            sample_size,
            max_run_time,
        }
    }

    /// Budget as a `Duration`. Negative or non-finite budgets clamp to zero.
    pub fn budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_run_time).unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_covers_every_class() {
        let classes = LabelSet::from_labels(&[0, 1, 2]);
        let bounds = LowerBoundaries::uniform(&classes, 0.9);
        assert_eq!(bounds.len(), 3);
        for c in classes.iter() {
            assert_eq!(bounds.get(c), Some(0.9));
        }
        assert_eq!(bounds.get(3), None);
    }

    #[test]
    fn lower_boundaries_json_is_a_plain_map() {
        let bounds = LowerBoundaries::new().with(0, 0.8).with(1, 0.75);
        let json = serde_json::to_string(&bounds).unwrap();
        assert_eq!(json, r#"{"0":0.8,"1":0.75}"#);
        let back: LowerBoundaries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bounds);
    }

    #[test]
    fn performance_boundary_budget() {
        let b = PerformanceBoundary::new(100, 0.25);
        assert_eq!(b.budget(), Duration::from_millis(250));
        assert_eq!(PerformanceBoundary::new(1, -1.0).budget(), Duration::ZERO);
    }

    #[test]
    fn performance_boundaries_parse_from_json() {
        let json = r#"[{"sample_size": 10, "max_run_time": 0.5}, {"sample_size": 1000, "max_run_time": 2.0}]"#;
        let spec: Vec<PerformanceBoundary> = serde_json::from_str(json).unwrap();
        assert_eq!(spec.len(), 2);
        assert_eq!(spec[1].sample_size, 1000);
    }
}
