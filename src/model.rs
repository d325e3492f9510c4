//! Trained model storage and prediction.
//!
//! A [`Model`] is the immutable output of training: one weight per schema
//! feature plus an intercept. Prediction is a dot product over an
//! **already-normalized** feature vector; preparing that vector with the
//! same [`NormalizationStats`] the model was trained with is the caller's
//! obligation ([`predict_rows`] handles it for raw rows).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{FeatureSchema, NormalizationStats, TrainingRow};
use crate::error::FitError;
use crate::normalize::normalize_row;

/// Ridge model parameters: weights in schema column order, plus bias.
///
/// Immutable after construction; may be read concurrently without locking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    weights: Vec<f64>,
    bias: f64,
}

impl Model {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Number of input features `d`.
    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Evaluate the model on one normalized feature vector.
    ///
    /// Computes `bias + Σ weights[i]·x[i]`. The only validation is the O(1)
    /// length check; the values themselves are trusted to be normalized.
    pub fn predict(&self, x: &[f64]) -> Result<f64, FitError> {
        if x.len() != self.weights.len() {
            return Err(FitError::SchemaMismatch {
                expected: self.weights.len(),
                got: x.len(),
            });
        }

        let mut acc = self.bias;
        for (w, v) in self.weights.iter().zip(x) {
            acc += w * v;
        }
        Ok(acc)
    }
}

/// Normalize and predict a batch of raw rows.
///
/// Each row is z-scored with `stats` and evaluated with `model`; output
/// order matches input order. Rows are independent, so the batch runs in
/// parallel.
pub fn predict_rows(
    model: &Model,
    rows: &[TrainingRow],
    schema: &FeatureSchema,
    stats: &NormalizationStats,
) -> Result<Vec<f64>, FitError> {
    if model.num_features() != schema.len() {
        return Err(FitError::SchemaMismatch {
            expected: model.num_features(),
            got: schema.len(),
        });
    }

    rows.par_iter()
        .enumerate()
        .map(|(i, row)| {
            let x = normalize_row(row, schema, stats).map_err(|e| match e {
                FitError::NonFiniteValue { feature, .. } => {
                    FitError::NonFiniteValue { feature, row: i }
                }
                other => other,
            })?;
            model.predict(&x)
        })
        .collect()
}
