//! Regression model capability consumed by the edge calculator.
//!
//! Models are trained elsewhere. This crate only loads artifacts and calls
//! `predict`; a loaded model is never mutated.

pub mod evaluate;
pub mod linear;
pub mod registry;

pub use evaluate::mean_absolute_error;
pub use linear::LinearModel;
pub use registry::ModelRegistry;

use crate::error::{AppError, Result};
use crate::types::FeatureSource;

/// A trained single-output regressor.
pub trait RegressionModel: Send + Sync {
    /// Stat the model projects (`points`, `rebounds`, `assists`).
    fn target(&self) -> &str;

    /// Ordered input columns; `predict` receives values in this order.
    fn feature_names(&self) -> &[String];

    /// Deterministic, side-effect free point prediction.
    fn predict(&self, features: &[f64]) -> f64;
}

/// Pulls the model's inputs out of `source`, in model order.
/// Fails with every absent or non-finite column listed.
pub fn model_inputs(model: &dyn RegressionModel, source: &impl FeatureSource) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(model.feature_names().len());
    let mut missing = Vec::new();
    for name in model.feature_names() {
        match source.feature(name) {
            Some(v) if v.is_finite() => values.push(v),
            _ => missing.push(name.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(AppError::MissingFeature(missing));
    }
    Ok(values)
}
