//! Binary/multiclass averaging policy.
//!
//! Callers ask for an averaging mode without knowing the class count.
//! Every suite entry point resolves the request exactly once through
//! [`AveragingPolicy::resolve`]; deeper layers only see resolved modes.

use drifter_core::domain::LabelSet;
use drifter_core::metrics::{Average, Metric};

use crate::error::SuiteError;

/// Averaging decisions for one label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AveragingPolicy {
    binary: bool,
}

impl AveragingPolicy {
    pub fn new(classes: &LabelSet) -> Self {
        Self {
            binary: classes.is_binary(),
        }
    }

    /// True iff the label set has exactly two classes.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Multiclass problems cannot use the binary average; substitute micro.
    /// Every other request passes through.
    pub fn reset_average(&self, average: Average) -> Average {
        if !self.binary && average == Average::Binary {
            Average::Micro
        } else {
            average
        }
    }

    /// ROC AUC checks of the single-model suite only run on multiclass
    /// problems.
    pub fn roc_auc_guard(&self) -> Result<(), SuiteError> {
        if self.binary {
            return Err(SuiteError::RocAucOnBinary);
        }
        Ok(())
    }

    /// Guard (for ROC AUC) then reset the average.
    pub fn resolve(&self, metric: Metric, average: Average) -> Result<Average, SuiteError> {
        if metric == Metric::RocAuc {
            self.roc_auc_guard()?;
        }
        Ok(self.reset_average(average))
    }
}
