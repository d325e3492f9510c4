//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during training and inference
//! - exported to JSON for portable model artifacts
//! - reloaded later to reproduce identical predictions elsewhere
//!
//! `NormalizationStats` and the trained model are **value objects**: created
//! once per training run, never mutated afterwards, and safe to read from any
//! number of threads concurrently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Ordered feature names, fixed for the lifetime of a trained model.
///
/// Order is significant: it defines the column index of each feature in the
/// design matrix, the weight vector, and every normalized input vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Convenience constructor from string literals.
    pub fn from_names(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Number of features `d`.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Feature names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// A raw row of named numeric fields, as produced by permissive ingestion.
///
/// Features and the target share one map, mirroring a parsed CSV record.
/// A key that is absent reads as `0.0` (see [`TrainingRow::value_or_zero`]);
/// a key that is present must hold a finite value or downstream stages
/// reject the row.
#[derive(Debug, Clone, Default)]
pub struct TrainingRow {
    values: HashMap<String, f64>,
}

impl TrainingRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            values: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Missing keys default to `0.0`.
    ///
    /// This is a documented defaulting behavior inherited from permissive
    /// ingestion, not a claim that the data was complete.
    pub fn value_or_zero(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }
}

impl From<HashMap<String, f64>> for TrainingRow {
    fn from(values: HashMap<String, f64>) -> Self {
        Self { values }
    }
}

/// Per-feature z-score statistics computed from a training set.
///
/// Invariant: every stored `std` is finite and strictly positive
/// (zero-variance features are forced to `1`, so normalization never divides
/// by zero). The *same* instance must be used both to build the training
/// design matrix and to normalize every later inference input; mismatched
/// stats silently produce meaningless predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationStats {
    mean: HashMap<String, f64>,
    std: HashMap<String, f64>,
}

impl NormalizationStats {
    /// Construct stats, enforcing the `std > 0` invariant.
    ///
    /// Any non-finite or non-positive standard deviation is replaced by `1`,
    /// so a constant feature contributes a constant zero after normalization
    /// instead of an undefined value.
    pub fn new(mean: HashMap<String, f64>, std: HashMap<String, f64>) -> Self {
        let std = std
            .into_iter()
            .map(|(k, v)| (k, if v.is_finite() && v > 0.0 { v } else { 1.0 }))
            .collect();
        Self { mean, std }
    }

    pub fn mean(&self, feature: &str) -> Option<f64> {
        self.mean.get(feature).copied()
    }

    pub fn std(&self, feature: &str) -> Option<f64> {
        self.std.get(feature).copied()
    }

    /// Number of features covered by these stats.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn means(&self) -> &HashMap<String, f64> {
        &self.mean
    }

    pub fn stds(&self) -> &HashMap<String, f64> {
        &self.std
    }

    /// Mean/std pair for one schema feature, or a schema mismatch if these
    /// stats were built against a different schema.
    pub fn require(&self, feature: &str, schema_len: usize) -> Result<(f64, f64), FitError> {
        match (self.mean(feature), self.std(feature)) {
            (Some(m), Some(s)) => Ok((m, s)),
            _ => Err(FitError::SchemaMismatch {
                expected: schema_len,
                got: self.len(),
            }),
        }
    }
}

/// Training-set fit diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub r2: f64,
    pub n: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_row_key_reads_as_zero() {
        let row = TrainingRow::from_pairs(&[("a", 3.0)]);
        assert_eq!(row.value_or_zero("a"), 3.0);
        assert_eq!(row.value_or_zero("missing"), 0.0);
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn stats_force_nonpositive_std_to_one() {
        let mean = HashMap::from([("a".to_string(), 5.0)]);
        let std = HashMap::from([("a".to_string(), 0.0)]);
        let stats = NormalizationStats::new(mean, std);
        assert_eq!(stats.std("a"), Some(1.0));
    }

    #[test]
    fn stats_require_unknown_feature_is_schema_mismatch() {
        let stats = NormalizationStats::new(HashMap::new(), HashMap::new());
        let err = stats.require("a", 3).unwrap_err();
        assert!(matches!(
            err,
            FitError::SchemaMismatch {
                expected: 3,
                got: 0
            }
        ));
    }
}
