//! Error type shared by training and inference.
//!
//! Every failure is terminal for the call that raised it: the core never
//! retries or recovers internally, it reports a distinguishable kind and
//! leaves policy to the caller.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum FitError {
    /// Training requires at least one row.
    #[error("empty training set")]
    EmptyTrainingSet,

    /// A present field held NaN or an infinity.
    ///
    /// Missing fields default to `0` instead (permissive-ingestion rule);
    /// only values that exist and are non-finite are rejected.
    #[error("non-finite value for feature '{feature}' in row {row}")]
    NonFiniteValue { feature: String, row: usize },

    /// Matrix/vector shapes disagree (e.g. `y` length vs. design rows).
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Regularization strength must be finite and strictly positive; the
    /// solvability guarantee of the normal equations depends on it.
    #[error("regularization strength must be positive, got {alpha}")]
    InvalidAlpha { alpha: f64 },

    /// Elimination selected a numerically zero pivot; the system is singular
    /// (or too ill-conditioned to solve without producing garbage).
    #[error("singular system: pivot in column {column} is numerically zero")]
    SingularSystem { column: usize },

    /// A feature vector does not line up with the schema the stats/model
    /// were built against.
    #[error("schema mismatch: expected {expected} features, got {got}")]
    SchemaMismatch { expected: usize, got: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),
}
