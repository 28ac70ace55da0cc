//! The trained model artifact: regressor, categorical encoders, and the
//! ordered feature list the regressor was trained against. All three are
//! produced offline and loaded read-only at startup; a missing or malformed
//! artifact is fatal.

pub mod encoders;
pub mod regressor;

pub use encoders::{Encoders, LabelEncoder};
pub use regressor::{GradientBoostedRegressor, Tree, TreeNode};

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    features: Vec<String>,
    encoders: Encoders,
    #[serde(flatten)]
    regressor: GradientBoostedRegressor,
}

pub struct PriceModel {
    features: Vec<String>,
    /// feature name → column position, so rows can be assembled by name.
    feature_index: HashMap<String, usize>,
    encoders: Encoders,
    regressor: GradientBoostedRegressor,
}

impl PriceModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)?;
        let model = Self::from_parts(artifact.features, artifact.encoders, artifact.regressor)?;
        info!(
            "Model loaded: {} trees, {} features",
            model.regressor.tree_count(),
            model.features.len()
        );
        Ok(model)
    }

    pub fn from_parts(
        features: Vec<String>,
        encoders: Encoders,
        regressor: GradientBoostedRegressor,
    ) -> Result<Self> {
        if features.is_empty() {
            return Err(AppError::Artifact("feature list is empty".to_string()));
        }
        // Each encoded categorical column ("season_enc" etc.) needs its
        // encoder; the numeric columns need nothing.
        for feature in &features {
            if let Some(base) = feature.strip_suffix("_enc") {
                if !encoders.contains(base) {
                    return Err(AppError::Artifact(format!(
                        "feature {feature} has no {base} encoder"
                    )));
                }
            }
        }
        regressor
            .validate(features.len())
            .map_err(AppError::Artifact)?;

        let feature_index = features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.clone(), i))
            .collect();
        Ok(Self {
            features,
            feature_index,
            encoders,
            regressor,
        })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn tree_count(&self) -> usize {
        self.regressor.tree_count()
    }

    pub fn encode(&self, column: &str, value: &str) -> i64 {
        self.encoders.encode(column, value)
    }

    /// Order the named features into the training column order and run the
    /// regressor. Features the artifact doesn't know are ignored; features
    /// the row doesn't supply stay 0.0.
    pub fn predict(&self, row: &HashMap<&str, f64>) -> f64 {
        let mut x = vec![0.0; self.features.len()];
        for (name, value) in row {
            if let Some(&i) = self.feature_index.get(*name) {
                x[i] = *value;
            }
        }
        self.regressor.predict(&x)
    }
}
