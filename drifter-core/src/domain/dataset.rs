//! Tabular dataset: a target column plus an ordered list of feature columns.
//!
//! Built either from a polars `DataFrame` (column selection by name) or from
//! plain column vectors. After construction the dataset is immutable; folds
//! and samples are produced as new values.

use polars::prelude::*;
use rand::Rng;
use thiserror::Error;

use super::label::{Label, LabelSet};

/// Errors from dataset construction and row selection.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("column '{column}' not found: {reason}")]
    MissingColumn { column: String, reason: String },

    #[error("column '{column}' cannot be read as {expected}: {reason}")]
    ColumnType {
        column: String,
        expected: &'static str,
        reason: String,
    },

    #[error("missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("row index {index} out of range for {len} rows")]
    RowOutOfRange { index: usize, len: usize },

    #[error("cannot sample {requested} rows from an empty dataset")]
    EmptySample { requested: usize },
}

/// Row-major feature matrix with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Build from rows; every row must have one value per column.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, DatasetError> {
        for (row, values) in rows.iter().enumerate() {
            if values.len() != columns.len() {
                return Err(DatasetError::LengthMismatch {
                    column: format!("row {row}"),
                    expected: columns.len(),
                    actual: values.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Positional row selection. Indices may repeat.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self, DatasetError> {
        let mut rows = Vec::with_capacity(indices.len());
        for &index in indices {
            let row = self.rows.get(index).ok_or(DatasetError::RowOutOfRange {
                index,
                len: self.rows.len(),
            })?;
            rows.push(row.clone());
        }
        Ok(Self {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Draw `n` rows uniformly with replacement.
    pub fn sample_with_replacement<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Self, DatasetError> {
        if self.rows.is_empty() {
            if n == 0 {
                return Ok(Self {
                    columns: self.columns.clone(),
                    rows: Vec::new(),
                });
            }
            return Err(DatasetError::EmptySample { requested: n });
        }
        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..self.rows.len())).collect();
        self.select_rows(&indices)
    }
}

/// Test dataset: feature matrix, true labels and the label set.
#[derive(Debug, Clone)]
pub struct Dataset {
    target: String,
    features: FeatureMatrix,
    labels: Vec<Label>,
    classes: LabelSet,
}

impl Dataset {
    /// Select `feature_columns` and `target` from a data frame.
    ///
    /// Feature columns are cast to `Float64` and the target to `Int64`.
    /// Nulls and NaNs are rejected.
    pub fn from_frame(
        frame: &DataFrame,
        target: &str,
        feature_columns: &[&str],
    ) -> Result<Self, DatasetError> {
        let height = frame.height();

        let target_col = frame
            .column(target)
            .map_err(|e| DatasetError::MissingColumn {
                column: target.to_string(),
                reason: e.to_string(),
            })?
            .cast(&DataType::Int64)
            .map_err(|e| type_error(target, "Int64", e))?;
        let target_ca = target_col
            .i64()
            .map_err(|e| type_error(target, "Int64", e))?;

        let mut labels = Vec::with_capacity(height);
        for row in 0..height {
            let label = target_ca.get(row).ok_or_else(|| DatasetError::MissingValue {
                column: target.to_string(),
                row,
            })?;
            labels.push(label);
        }

        let mut columns = Vec::with_capacity(feature_columns.len());
        for &name in feature_columns {
            let col = frame
                .column(name)
                .map_err(|e| DatasetError::MissingColumn {
                    column: name.to_string(),
                    reason: e.to_string(),
                })?
                .cast(&DataType::Float64)
                .map_err(|e| type_error(name, "Float64", e))?;
            let ca = col.f64().map_err(|e| type_error(name, "Float64", e))?;
            let values: Vec<Option<f64>> = (0..height).map(|row| ca.get(row)).collect();
            columns.push((name.to_string(), values));
        }

        Self::assemble(target, labels, columns)
    }

    /// Build from plain columns. Every feature column must have one value
    /// per label; NaN is treated as a missing value.
    pub fn from_columns(
        target: &str,
        labels: Vec<Label>,
        features: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, DatasetError> {
        let columns = features
            .into_iter()
            .map(|(name, values)| (name, values.into_iter().map(Some).collect()))
            .collect();
        Self::assemble(target, labels, columns)
    }

    fn assemble(
        target: &str,
        labels: Vec<Label>,
        columns: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self, DatasetError> {
        let n = labels.len();
        for (name, values) in &columns {
            if values.len() != n {
                return Err(DatasetError::LengthMismatch {
                    column: name.clone(),
                    expected: n,
                    actual: values.len(),
                });
            }
        }

        let mut rows = Vec::with_capacity(n);
        for row in 0..n {
            let mut values = Vec::with_capacity(columns.len());
            for (name, column) in &columns {
                match column[row] {
                    Some(v) if !v.is_nan() => values.push(v),
                    _ => {
                        return Err(DatasetError::MissingValue {
                            column: name.clone(),
                            row,
                        })
                    }
                }
            }
            rows.push(values);
        }

        let names = columns.into_iter().map(|(name, _)| name).collect();
        let classes = LabelSet::from_labels(&labels);

        Ok(Self {
            target: target.to_string(),
            features: FeatureMatrix { columns: names, rows },
            labels,
            classes,
        })
    }

    pub fn target_name(&self) -> &str {
        &self.target
    }

    pub fn feature_names(&self) -> &[String] {
        self.features.columns()
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn classes(&self) -> &LabelSet {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row indices whose true label equals `label`, in dataset order.
    pub fn rows_with_label(&self, label: Label) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect()
    }

    /// Positional selection of features and labels together.
    pub fn select_rows(&self, indices: &[usize]) -> Result<(FeatureMatrix, Vec<Label>), DatasetError> {
        let features = self.features.select_rows(indices)?;
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        Ok((features, labels))
    }

    /// Random feature rows drawn with replacement.
    pub fn sample_features<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<FeatureMatrix, DatasetError> {
        self.features.sample_with_replacement(n, rng)
    }
}

fn type_error(column: &str, expected: &'static str, err: PolarsError) -> DatasetError {
    DatasetError::ColumnType {
        column: column.to_string(),
        expected,
        reason: err.to_string(),
    }
}
