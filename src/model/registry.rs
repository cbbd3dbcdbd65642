use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::model::{LinearModel, RegressionModel};
use crate::types::Stat;

/// Read-only prop type -> model map, built once at startup and passed
/// explicitly to whatever needs projections.
#[derive(Default, Clone)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn RegressionModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, prop_type: &str, model: impl RegressionModel + 'static) -> Self {
        self.models.insert(prop_type.to_string(), Arc::new(model));
        self
    }

    /// Loads `{stat}_model.json` for each projected stat found in `dir`.
    /// Missing artifacts are logged and skipped; a malformed one is an error.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut registry = Self::new();
        for stat in Stat::ALL {
            let path = dir.join(format!("{}_model.json", stat.as_str()));
            if !path.exists() {
                warn!("No model artifact for {stat} at {}", path.display());
                continue;
            }
            let model = LinearModel::load(&path)?;
            if model.target() != stat.as_str() {
                warn!(
                    "Model at {} declares target '{}', registering it for {stat}",
                    path.display(),
                    model.target()
                );
            }
            info!(
                prop_type = %stat,
                features = model.feature_names().len(),
                "Loaded model from {}",
                path.display()
            );
            registry.models.insert(stat.as_str().to_string(), Arc::new(model));
        }
        Ok(registry)
    }

    pub fn get(&self, prop_type: &str) -> Option<&dyn RegressionModel> {
        self.models.get(prop_type).map(|m| m.as_ref())
    }

    pub fn contains(&self, prop_type: &str) -> bool {
        self.models.contains_key(prop_type)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Registered prop types, sorted.
    pub fn prop_types(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.models.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("prop_types", &self.prop_types())
            .finish()
    }
}
