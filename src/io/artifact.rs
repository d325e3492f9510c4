//! Read/write model JSON artifacts.
//!
//! The artifact is the "portable" representation of a trained model: a flat
//! record holding everything needed to reproduce identical predictions
//! elsewhere:
//!
//! - `schema`: feature names in column order
//! - `weights` + `bias`: the model parameters
//! - `mean` + `std`: the normalization statistics the model was trained with
//!
//! No persistence format is mandated by the core; this JSON helper exists so
//! callers that do want to serialize have a known-correct round trip.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FeatureSchema, NormalizationStats};
use crate::error::FitError;
use crate::fit::TrainedModel;
use crate::model::Model;

/// Flat serialization record for a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema: Vec<String>,
    pub weights: Vec<f64>,
    pub bias: f64,
    pub mean: HashMap<String, f64>,
    pub std: HashMap<String, f64>,
}

impl ModelArtifact {
    pub fn from_trained(trained: &TrainedModel) -> Self {
        Self {
            schema: trained.schema.names().to_vec(),
            weights: trained.model.weights().to_vec(),
            bias: trained.model.bias(),
            mean: trained.stats.means().clone(),
            std: trained.stats.stds().clone(),
        }
    }

    /// Rebuild the runtime value objects.
    ///
    /// The `std > 0` invariant is re-enforced on load, so a hand-edited
    /// artifact with a zero or negative std cannot reintroduce division by
    /// zero.
    pub fn into_parts(self) -> Result<(Model, NormalizationStats, FeatureSchema), FitError> {
        if self.weights.len() != self.schema.len() {
            return Err(FitError::SchemaMismatch {
                expected: self.schema.len(),
                got: self.weights.len(),
            });
        }

        let model = Model::new(self.weights, self.bias);
        let stats = NormalizationStats::new(self.mean, self.std);
        let schema = FeatureSchema::new(self.schema);

        // Stats must cover every schema feature.
        for name in schema.names() {
            stats.require(name, schema.len())?;
        }

        Ok((model, stats, schema))
    }
}

/// Write a model artifact as pretty-printed JSON.
pub fn write_model_json(path: &Path, artifact: &ModelArtifact) -> Result<(), FitError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, artifact)?;
    Ok(())
}

/// Read a model artifact from JSON.
pub fn read_model_json(path: &Path) -> Result<ModelArtifact, FitError> {
    let file = File::open(path)?;
    let artifact: ModelArtifact = serde_json::from_reader(file)?;
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrainingRow;
    use crate::fit::{RidgeOptions, train};
    use crate::normalize::normalize_row;

    fn trained_fixture() -> (TrainedModel, Vec<TrainingRow>, FeatureSchema) {
        let schema = FeatureSchema::from_names(&["f1", "f2"]);
        let rows: Vec<TrainingRow> = (0..6)
            .map(|i| {
                let f1 = i as f64;
                TrainingRow::from_pairs(&[
                    ("f1", f1),
                    ("f2", 3.0 - f1),
                    ("target", 2.0 * f1 + 1.0),
                ])
            })
            .collect();
        let trained = train(&rows, &schema, "target", &RidgeOptions::default()).unwrap();
        (trained, rows, schema)
    }

    #[test]
    fn artifact_round_trip_reproduces_predictions() {
        let (trained, rows, schema) = trained_fixture();

        let json = serde_json::to_string(&ModelArtifact::from_trained(&trained)).unwrap();
        let restored: ModelArtifact = serde_json::from_str(&json).unwrap();
        let (model, stats, schema2) = restored.into_parts().unwrap();

        assert_eq!(schema2, schema);
        for row in &rows {
            let x1 = normalize_row(row, &schema, &trained.stats).unwrap();
            let x2 = normalize_row(row, &schema2, &stats).unwrap();
            assert_eq!(
                trained.model.predict(&x1).unwrap(),
                model.predict(&x2).unwrap()
            );
        }
    }

    #[test]
    fn mismatched_weight_count_is_rejected() {
        let artifact = ModelArtifact {
            schema: vec!["a".to_string(), "b".to_string()],
            weights: vec![1.0],
            bias: 0.0,
            mean: HashMap::new(),
            std: HashMap::new(),
        };
        let err = artifact.into_parts().unwrap_err();
        assert!(matches!(err, FitError::SchemaMismatch { .. }));
    }

    #[test]
    fn incomplete_stats_are_rejected() {
        let artifact = ModelArtifact {
            schema: vec!["a".to_string()],
            weights: vec![1.0],
            bias: 0.0,
            mean: HashMap::new(),
            std: HashMap::new(),
        };
        let err = artifact.into_parts().unwrap_err();
        assert!(matches!(err, FitError::SchemaMismatch { .. }));
    }

    #[test]
    fn loaded_zero_std_is_forced_positive() {
        let artifact = ModelArtifact {
            schema: vec!["a".to_string()],
            weights: vec![1.0],
            bias: 0.0,
            mean: HashMap::from([("a".to_string(), 2.0)]),
            std: HashMap::from([("a".to_string(), 0.0)]),
        };
        let (_model, stats, _schema) = artifact.into_parts().unwrap();
        assert_eq!(stats.std("a"), Some(1.0));
    }

    #[test]
    fn file_round_trip() {
        let (trained, _rows, _schema) = trained_fixture();
        let artifact = ModelArtifact::from_trained(&trained);

        let path = std::env::temp_dir().join(format!(
            "ridgefit_artifact_{}.json",
            std::process::id()
        ));
        write_model_json(&path, &artifact).unwrap();
        let restored = read_model_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(restored, artifact);
    }
}
