use crate::error::{AppError, Result};
use crate::model::{model_inputs, RegressionModel};
use crate::types::{FeatureRow, Stat};

/// Mean absolute error of `model` against the actual `target` value on each row.
pub fn mean_absolute_error(
    model: &dyn RegressionModel,
    rows: &[FeatureRow],
    target: Stat,
) -> Result<f64> {
    if rows.is_empty() {
        return Err(AppError::InsufficientData(format!(
            "no rows to evaluate the {target} model on"
        )));
    }
    let mut total = 0.0;
    for row in rows {
        let inputs = model_inputs(model, row)?;
        total += (model.predict(&inputs) - row.stat(target)).abs();
    }
    Ok(total / rows.len() as f64)
}
