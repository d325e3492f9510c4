//! Design matrix assembly.
//!
//! Turns raw rows into the dense inputs the ridge trainer consumes:
//!
//! - `X`: `n × d` matrix of z-scored features, schema order defining the
//!   columns, input order defining the rows
//! - `y`: length-`n` vector of **raw** (unnormalized) targets
//!
//! Rows are independent, so assembly is parallel across rows. Row order in
//! the output always matches the input order.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::domain::{FeatureSchema, NormalizationStats, TrainingRow};
use crate::error::FitError;
use crate::normalize::normalize_row;

/// Build the normalized design matrix and raw target vector.
///
/// Missing feature or target keys default to `0.0` before normalization;
/// present non-finite values fail with the offending feature and row index.
pub fn build_design(
    rows: &[TrainingRow],
    schema: &FeatureSchema,
    stats: &NormalizationStats,
    target: &str,
) -> Result<(DMatrix<f64>, DVector<f64>), FitError> {
    if rows.is_empty() {
        return Err(FitError::EmptyTrainingSet);
    }

    let n = rows.len();
    let d = schema.len();

    let normalized: Vec<Vec<f64>> = rows
        .par_iter()
        .enumerate()
        .map(|(i, row)| {
            normalize_row(row, schema, stats).map_err(|e| match e {
                // `normalize_row` has no row context; attach it here.
                FitError::NonFiniteValue { feature, .. } => {
                    FitError::NonFiniteValue { feature, row: i }
                }
                other => other,
            })
        })
        .collect::<Result<_, _>>()?;

    let mut y = Vec::with_capacity(n);
    for (i, row) in rows.iter().enumerate() {
        let t = row.value_or_zero(target);
        if !t.is_finite() {
            return Err(FitError::NonFiniteValue {
                feature: target.to_string(),
                row: i,
            });
        }
        y.push(t);
    }

    let mut flat = Vec::with_capacity(n * d);
    for row in &normalized {
        flat.extend_from_slice(row);
    }

    Ok((DMatrix::from_row_slice(n, d, &flat), DVector::from_vec(y)))
}
