//! Training orchestration.
//!
//! Responsibilities:
//!
//! - run the full pipeline: stats → design matrix → ridge solve
//! - compute training-set fit diagnostics
//! - bundle the immutable artifacts a caller needs for inference

pub mod ridge;

pub use ridge::*;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::design::build_design;
use crate::domain::{FeatureSchema, FitQuality, NormalizationStats, TrainingRow};
use crate::error::FitError;
use crate::model::Model;
use crate::normalize::compute_stats;

/// Everything one training run produces.
///
/// `stats` are the normalization statistics the model was fitted under;
/// inference inputs must be normalized with these exact values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    pub model: Model,
    pub stats: NormalizationStats,
    pub schema: FeatureSchema,
    pub quality: FitQuality,
}

/// Train a ridge model from raw rows.
///
/// Pipeline: compute per-feature stats, build the z-scored design matrix and
/// raw target vector, solve the regularized normal equations, then score the
/// fit on the training set itself.
pub fn train(
    rows: &[TrainingRow],
    schema: &FeatureSchema,
    target: &str,
    options: &RidgeOptions,
) -> Result<TrainedModel, FitError> {
    let stats = compute_stats(rows, schema)?;
    let (x, y) = build_design(rows, schema, &stats, target)?;
    let model = train_ridge(&x, &y, options.alpha)?;
    let quality = training_quality(&model, &x, &y)?;

    Ok(TrainedModel {
        model,
        stats,
        schema: schema.clone(),
        quality,
    })
}

/// Score a model on the design matrix it was trained from.
fn training_quality(
    model: &Model,
    x: &DMatrix<f64>,
    y: &DVector<f64>,
) -> Result<FitQuality, FitError> {
    let n = x.nrows();
    let mean_y = y.sum() / n as f64;

    let mut sse = 0.0;
    let mut tss = 0.0;
    let mut row = vec![0.0; x.ncols()];
    for i in 0..n {
        for (j, v) in row.iter_mut().enumerate() {
            *v = x[(i, j)];
        }
        let fit = model.predict(&row)?;
        let r = y[i] - fit;
        sse += r * r;
        let dy = y[i] - mean_y;
        tss += dy * dy;
    }

    let rmse = (sse / n as f64).sqrt();
    // R² is undefined for a constant target; report a perfect-fit 1.0 there
    // (the model reproduces the constant via its bias).
    let r2 = if tss > 0.0 { 1.0 - sse / tss } else { 1.0 };

    Ok(FitQuality { sse, rmse, r2, n })
}
