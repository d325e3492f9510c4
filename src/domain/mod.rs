//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the feature schema (`FeatureSchema`) that fixes column order
//! - raw input rows (`TrainingRow`)
//! - normalization statistics (`NormalizationStats`)
//! - fit diagnostics (`FitQuality`)

pub mod types;

pub use types::*;
