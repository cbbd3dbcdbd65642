use tracing::debug;

use crate::config::EdgeDefaults;
use crate::error::{AppError, Result};
use crate::model::{model_inputs, RegressionModel};
use crate::odds::{american_to_implied_prob, implied_prob_to_american, prob_over_from_projection};
use crate::types::{EdgeResult, FeatureSource, PropRow};

/// Edge of the model's over probability against the book's implied probability.
///
/// Errors: `MissingFeature` when the row lacks a model input, `InvalidOdds`
/// for odds inside (-100, 100), `Domain` when the line or projection is not
/// finite or the model probability saturates to 0 or 1.
pub fn compute_edge(
    features: &impl FeatureSource,
    model: &dyn RegressionModel,
    line: f64,
    american_odds: f64,
    proj_std: f64,
) -> Result<EdgeResult> {
    let inputs = model_inputs(model, features)?;

    let projection = model.predict(&inputs);
    if !projection.is_finite() {
        return Err(AppError::Domain(format!(
            "{} model produced a non-finite projection",
            model.target()
        )));
    }
    if !line.is_finite() {
        return Err(AppError::Domain(format!("line must be finite, got {line}")));
    }

    let prob_over_model = prob_over_from_projection(projection, line, proj_std);
    let prob_over_implied = american_to_implied_prob(american_odds)?;
    let edge_pct = (prob_over_model - prob_over_implied) * 100.0;
    let model_american_odds = implied_prob_to_american(prob_over_model).ok_or_else(|| {
        AppError::Domain(format!(
            "model probability {prob_over_model} has no American odds equivalent"
        ))
    })?;

    debug!(
        projection,
        line,
        prob_over_model,
        prob_over_implied,
        edge_pct,
        "computed edge"
    );

    Ok(EdgeResult {
        projection,
        prob_over_model,
        prob_over_implied,
        edge_pct,
        model_american_odds,
    })
}

/// `compute_edge` for a slate row, filling absent odds / std from `defaults`.
pub fn compute_prop_edge(
    row: &PropRow,
    model: &dyn RegressionModel,
    defaults: &EdgeDefaults,
) -> Result<EdgeResult> {
    compute_edge(
        row,
        model,
        row.line,
        defaults.odds_or_default(row.american_odds),
        defaults.proj_std_or_default(row.proj_std),
    )
}
