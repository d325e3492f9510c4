//! Per-feature z-score normalization.
//!
//! Training computes one mean/std pair per schema feature
//! ([`compute_stats`]); both training and inference then map raw values
//! through `(value - mean) / std` ([`normalize_row`], [`normalize_vec`]).
//!
//! Conventions:
//! - **Population** standard deviation: the sum of squared deviations is
//!   divided by `n`, not `n - 1`.
//! - A feature with zero variance gets `std = 1`, so it normalizes to a
//!   constant zero instead of an undefined value. This also covers `n = 1`.
//! - Missing keys read as `0.0` before normalization (permissive ingestion);
//!   present non-finite values are rejected.

use std::collections::HashMap;

use crate::domain::{FeatureSchema, NormalizationStats, TrainingRow};
use crate::error::FitError;

/// Compute per-feature normalization statistics from a training set.
///
/// Deterministic given identical row ordering and values; no side effects.
pub fn compute_stats(
    rows: &[TrainingRow],
    schema: &FeatureSchema,
) -> Result<NormalizationStats, FitError> {
    if rows.is_empty() {
        return Err(FitError::EmptyTrainingSet);
    }

    let n = rows.len() as f64;
    let mut mean = HashMap::with_capacity(schema.len());
    let mut std = HashMap::with_capacity(schema.len());

    for name in schema.names() {
        let mut sum = 0.0;
        for (i, row) in rows.iter().enumerate() {
            let v = row.value_or_zero(name);
            if !v.is_finite() {
                return Err(FitError::NonFiniteValue {
                    feature: name.clone(),
                    row: i,
                });
            }
            sum += v;
        }
        let m = sum / n;

        let mut ss = 0.0;
        for row in rows {
            let d = row.value_or_zero(name) - m;
            ss += d * d;
        }
        let s = (ss / n).sqrt();

        mean.insert(name.clone(), m);
        std.insert(name.clone(), s);
    }

    // `NormalizationStats::new` forces zero/non-positive stds to 1.
    Ok(NormalizationStats::new(mean, std))
}

/// Z-score one raw feature map in schema order.
///
/// This is the inference-side helper: callers must run every prediction
/// input through the *same* stats the model was trained with.
pub fn normalize_row(
    row: &TrainingRow,
    schema: &FeatureSchema,
    stats: &NormalizationStats,
) -> Result<Vec<f64>, FitError> {
    let mut out = Vec::with_capacity(schema.len());
    for name in schema.names() {
        let (m, s) = stats.require(name, schema.len())?;
        let v = row.value_or_zero(name);
        if !v.is_finite() {
            return Err(FitError::NonFiniteValue {
                feature: name.clone(),
                row: 0,
            });
        }
        out.push((v - m) / s);
    }
    Ok(out)
}

/// Z-score a pre-extracted ordered feature vector.
pub fn normalize_vec(
    values: &[f64],
    schema: &FeatureSchema,
    stats: &NormalizationStats,
) -> Result<Vec<f64>, FitError> {
    if values.len() != schema.len() {
        return Err(FitError::SchemaMismatch {
            expected: schema.len(),
            got: values.len(),
        });
    }

    let mut out = Vec::with_capacity(values.len());
    for (name, &v) in schema.names().iter().zip(values) {
        let (m, s) = stats.require(name, schema.len())?;
        if !v.is_finite() {
            return Err(FitError::NonFiniteValue {
                feature: name.clone(),
                row: 0,
            });
        }
        out.push((v - m) / s);
    }
    Ok(out)
}
