//! Resampling layer: fold-by-fold train/evaluate cycles.
//!
//! Every refit happens on `fresh_clone()` of the caller's classifier, so the
//! caller's fitted instance is never touched. Each fold gets its own clone;
//! nothing learned on one fold leaks into the next.

use anyhow::Context;
use tracing::debug;

use drifter_core::classifier::{Classifier, FreshClone};
use drifter_core::domain::{ClassScores, Dataset, Label};
use drifter_core::folds::{Fold, FoldGenerator, KFold};
use drifter_core::metrics::{Metric, ScoreError, ScoreOptions};

use crate::error::SuiteError;

/// Restrict per-row options (sample weights) to `rows`. Weights must cover
/// all `n_samples` rows of the dataset.
fn fold_options(opts: &ScoreOptions, rows: &[usize], n_samples: usize) -> Result<ScoreOptions, ScoreError> {
    let mut fold_opts = opts.clone();
    if let Some(weights) = &opts.sample_weight {
        if weights.len() != n_samples {
            return Err(ScoreError::WeightLengthMismatch {
                expected: n_samples,
                actual: weights.len(),
            });
        }
        fold_opts.sample_weight = Some(rows.iter().map(|&i| weights[i]).collect());
    }
    Ok(fold_opts)
}

/// Fit a fresh clone on the fold's train rows and predict its test rows.
/// Returns the test labels and the predictions.
fn fit_predict_fold<C: FreshClone>(
    clf: &C,
    data: &Dataset,
    fold: &Fold,
    index: usize,
) -> Result<(Vec<Label>, Vec<Label>), SuiteError> {
    let (x_train, y_train) = data.select_rows(&fold.train)?;
    let (x_test, y_test) = data.select_rows(&fold.test)?;

    let mut model = clf.fresh_clone();
    model
        .fit(&x_train, &y_train)
        .with_context(|| format!("{} failed to fit fold {index}", clf.name()))?;
    let y_pred = model
        .predict(&x_test)
        .with_context(|| format!("{} failed to predict fold {index}", clf.name()))?;
    Ok((y_test, y_pred))
}

/// One score per fold produced by `folds`, in fold order.
pub fn cross_validate<C, G>(
    clf: &C,
    data: &Dataset,
    metric: Metric,
    opts: &ScoreOptions,
    folds: &G,
) -> Result<Vec<f64>, SuiteError>
where
    C: FreshClone,
    G: FoldGenerator + ?Sized,
{
    let splits = folds.split(data.labels())?;
    let mut scores = Vec::with_capacity(splits.len());
    for (index, fold) in splits.iter().enumerate() {
        let (y_test, y_pred) = fit_predict_fold(clf, data, fold, index)?;
        let fold_opts = fold_options(opts, &fold.test, data.len())?;
        let score = metric.score(&y_test, &y_pred, &fold_opts)?;
        debug!(fold = index, %metric, score, "fold scored");
        scores.push(score);
    }
    Ok(scores)
}

/// Shuffled k-fold (seeded) with one per-class score map per fold.
///
/// Keys of every map are the dataset's full label set, including classes
/// absent from a particular test fold.
pub fn per_class_cross_val<C: FreshClone>(
    clf: &C,
    data: &Dataset,
    metric: Metric,
    opts: &ScoreOptions,
    cv: usize,
    seed: u64,
) -> Result<Vec<ClassScores>, SuiteError> {
    let splits = KFold::new(cv).shuffled(seed).split(data.labels())?;
    let mut per_fold = Vec::with_capacity(splits.len());
    for (index, fold) in splits.iter().enumerate() {
        let (y_test, y_pred) = fit_predict_fold(clf, data, fold, index)?;
        let fold_opts = fold_options(opts, &fold.test, data.len())?;
        let scores = metric.per_class(&y_test, &y_pred, data.classes(), &fold_opts)?;
        debug!(fold = index, %metric, ?scores, "fold scored per class");
        per_fold.push(scores);
    }
    Ok(per_fold)
}

/// Out-of-fold predictions: row i is predicted by the clone fitted on the
/// folds that exclude it.
pub fn cross_val_predict<C, G>(clf: &C, data: &Dataset, folds: &G) -> Result<Vec<Label>, SuiteError>
where
    C: FreshClone,
    G: FoldGenerator + ?Sized,
{
    let splits = folds.split(data.labels())?;
    let mut predictions: Vec<Option<Label>> = vec![None; data.len()];
    for (index, fold) in splits.iter().enumerate() {
        let (_, y_pred) = fit_predict_fold(clf, data, fold, index)?;
        for (&row, label) in fold.test.iter().zip(y_pred) {
            predictions[row] = Some(label);
        }
    }

    predictions
        .into_iter()
        .enumerate()
        .map(|(row, p)| p.ok_or(SuiteError::IncompletePredictions { row }))
        .collect()
}

/// Predictions of an already-fitted classifier on every row.
pub fn predict_all<C: Classifier + ?Sized>(clf: &C, data: &Dataset) -> Result<Vec<Label>, SuiteError> {
    let y_pred = clf
        .predict(data.features())
        .with_context(|| format!("{} failed to predict the test data", clf.name()))?;
    Ok(y_pred)
}
