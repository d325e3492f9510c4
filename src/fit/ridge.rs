//! Ridge regression via the regularized normal equations.
//!
//! Given the normalized design matrix `X` (n×d) and raw targets `y`:
//!
//! ```text
//! G = XᵗX + αI
//! G·w = Xᵗy
//! bias = mean(y) − Σ_j meanX[j]·w[j]
//! ```
//!
//! For `α > 0` the Gram matrix `G` is symmetric positive-definite whenever
//! `XᵗX` is positive semi-definite, so the LU solve cannot hit a singular
//! system for any valid input. The bias step recenters the model so that a
//! prediction at the per-column mean feature vector equals `mean(y)` — an
//! invariant of the fit, not a heuristic.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;
use crate::math::solve_lu;
use crate::model::Model;

/// Default L2 regularization strength.
pub const DEFAULT_ALPHA: f64 = 0.85;

/// Options controlling the ridge fit.
#[derive(Debug, Clone)]
pub struct RidgeOptions {
    /// L2 regularization strength `α`; must be finite and strictly positive.
    pub alpha: f64,
}

impl Default for RidgeOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl RidgeOptions {
    pub fn with_alpha(alpha: f64) -> Self {
        Self { alpha }
    }
}

/// Fit ridge weights and bias from a prepared design matrix.
pub fn train_ridge(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    alpha: f64,
) -> Result<Model, FitError> {
    let n = x.nrows();
    let d = x.ncols();

    if n == 0 {
        return Err(FitError::EmptyTrainingSet);
    }
    if y.len() != n {
        return Err(FitError::DimensionMismatch {
            expected: n,
            got: y.len(),
        });
    }
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(FitError::InvalidAlpha { alpha });
    }

    let xt = x.transpose();
    let mut gram = &xt * x;
    for j in 0..d {
        gram[(j, j)] += alpha;
    }
    let rhs = &xt * y;

    let w = solve_lu(&gram, &rhs)?;

    // Recenter so that predicting the column-mean vector yields mean(y).
    // With z-scored columns the means are ~0 and the bias is ~mean(y).
    let mean_y = y.sum() / n as f64;
    let mut bias = mean_y;
    for j in 0..d {
        let mean_col = x.column(j).sum() / n as f64;
        bias -= mean_col * w[j];
    }

    Ok(Model::new(w.iter().copied().collect(), bias))
}
