use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::model::RegressionModel;

/// On-disk form of a linear projection model.
///
/// ```json
/// { "target": "points", "intercept": 1.5, "coefficients": { "points_rolling_5": 0.6 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub target: String,
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
}

/// `intercept + sum(w_i * x_i)` over named features.
#[derive(Debug, Clone)]
pub struct LinearModel {
    target: String,
    intercept: f64,
    /// Sorted by feature name.
    feature_names: Vec<String>,
    weights: Vec<f64>,
}

impl LinearModel {
    pub fn new<I, S>(target: &str, intercept: f64, coefficients: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let sorted: BTreeMap<String, f64> =
            coefficients.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let (feature_names, weights): (Vec<String>, Vec<f64>) = sorted.into_iter().unzip();
        Self {
            target: target.to_string(),
            intercept,
            feature_names,
            weights,
        }
    }

    pub fn from_artifact(artifact: LinearModelArtifact) -> Result<Self> {
        if !artifact.intercept.is_finite() {
            return Err(AppError::Schema(format!(
                "{} model: intercept is not finite",
                artifact.target
            )));
        }
        if artifact.coefficients.is_empty() {
            return Err(AppError::Schema(format!(
                "{} model: no coefficients",
                artifact.target
            )));
        }
        if let Some((name, _)) = artifact.coefficients.iter().find(|(_, w)| !w.is_finite()) {
            return Err(AppError::Schema(format!(
                "{} model: coefficient for {name} is not finite",
                artifact.target
            )));
        }
        Ok(Self::new(&artifact.target, artifact.intercept, artifact.coefficients))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let artifact: LinearModelArtifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

impl RegressionModel for LinearModel {
    fn target(&self) -> &str {
        &self.target
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}
