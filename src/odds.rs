//! American odds <-> probability conversion and the projection-to-probability map.

use crate::config::{LOGISTIC_STEEPNESS, MIN_ODDS_MAGNITUDE, SIGMA_FLOOR};
use crate::error::{AppError, Result};

/// Implied probability of an American odds quote, ignoring vig.
/// +150 -> 100/250, -110 -> 110/210.
pub fn american_to_implied_prob(odds: f64) -> Result<f64> {
    if !odds.is_finite() || odds.abs() < MIN_ODDS_MAGNITUDE {
        return Err(AppError::InvalidOdds(odds));
    }
    if odds > 0.0 {
        Ok(100.0 / (odds + 100.0))
    } else {
        Ok(-odds / (-odds + 100.0))
    }
}

/// American odds implied by a probability. `None` outside (0, 1).
///
/// `p > 0.5` is quoted as a favourite (negative), so exactly 0.5 comes out as +100.
/// Non-integer prices are rounded half-to-even.
pub fn implied_prob_to_american(p: f64) -> Option<i64> {
    if !(p > 0.0 && p < 1.0) {
        return None;
    }
    if p > 0.5 {
        Some(-((p / (1.0 - p) * 100.0).round_ties_even() as i64))
    } else {
        Some(((1.0 - p) / p * 100.0).round_ties_even() as i64)
    }
}

/// P(stat finishes over `line`) given a point projection and its error std.
///
/// Logistic approximation of the normal CDF: `1 / (1 + e^(-k*z))` with
/// `z = (projection - line) / max(sigma, 0.01)` and k = 1.6.
pub fn prob_over_from_projection(projection: f64, line: f64, sigma: f64) -> f64 {
    let z = (projection - line) / sigma.max(SIGMA_FLOOR);
    1.0 / (1.0 + (-LOGISTIC_STEEPNESS * z).exp())
}
