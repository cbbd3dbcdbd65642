use crate::error::{AppError, Result};

/// Trailing window (games) for the `*_rolling_5` and `minutes_rolling` features.
pub const ROLLING_WINDOW: usize = 5;

/// Form score weights applied to the points / rebounds / assists rolling means.
pub mod form_weights {
    pub const POINTS: f64 = 0.5;
    pub const REBOUNDS: f64 = 0.3;
    pub const ASSISTS: f64 = 0.2;
}

/// Steepness of the logistic used in place of a normal CDF when mapping a
/// projection z-score to P(over). 1.6 tracks the standard normal closely near 0.
pub const LOGISTIC_STEEPNESS: f64 = 1.6;

/// Lower bound applied to the projection std before dividing.
pub const SIGMA_FLOOR: f64 = 0.01;

/// Valid American odds never fall inside (-100, 100).
pub const MIN_ODDS_MAGNITUDE: f64 = 100.0;

/// Standard -110 line used when a prop has no book price.
pub const DEFAULT_AMERICAN_ODDS: f64 = -110.0;

/// Projection error std used when a prop row carries no `proj_std`.
pub const DEFAULT_PROJ_STD: f64 = 3.0;

pub const DEFAULT_API_PORT: u16 = 3000;

// ---------------------------------------------------------------------------
// Per-row fallbacks
// ---------------------------------------------------------------------------

/// Fallbacks for optional per-row prop inputs. Missing values are substituted,
/// never treated as errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDefaults {
    pub american_odds: f64,
    pub proj_std: f64,
}

impl Default for EdgeDefaults {
    fn default() -> Self {
        Self {
            american_odds: DEFAULT_AMERICAN_ODDS,
            proj_std: DEFAULT_PROJ_STD,
        }
    }
}

impl EdgeDefaults {
    pub fn odds_or_default(&self, odds: Option<f64>) -> f64 {
        odds.unwrap_or(self.american_odds)
    }

    pub fn proj_std_or_default(&self, proj_std: Option<f64>) -> f64 {
        proj_std.unwrap_or(self.proj_std)
    }
}

// ---------------------------------------------------------------------------
// Season average semantics
// ---------------------------------------------------------------------------

/// How `{stat}_avg_season` is aggregated for each game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonAverageMode {
    /// Mean over every game of the player in the input, identical on each row.
    /// Later games leak into earlier rows; kept as the default for model compatibility.
    #[default]
    FullHistory,
    /// Mean over the player's games up to and including the current one.
    Expanding,
}

impl std::str::FromStr for SeasonAverageMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "full_history" => Ok(SeasonAverageMode::FullHistory),
            "expanding" => Ok(SeasonAverageMode::Expanding),
            other => Err(AppError::Config(format!(
                "SEASON_AVERAGE_MODE must be 'full' or 'expanding', got '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for SeasonAverageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonAverageMode::FullHistory => write!(f, "full"),
            SeasonAverageMode::Expanding => write!(f, "expanding"),
        }
    }
}

// ---------------------------------------------------------------------------
// Process config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Historical box scores (GAME_LOGS_PATH)
    pub game_logs_path: String,
    /// Upcoming slate with lines and features (PROPS_PATH)
    pub props_path: String,
    /// Directory holding `{stat}_model.json` artifacts (MODELS_DIR)
    pub models_dir: String,
    pub api_port: u16,
    pub season_average_mode: SeasonAverageMode,
    pub edge_defaults: EdgeDefaults,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_port = match lookup("API_PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            None => DEFAULT_API_PORT,
        };

        let season_average_mode = match lookup("SEASON_AVERAGE_MODE") {
            Some(v) => v.parse()?,
            None => SeasonAverageMode::default(),
        };

        let mut edge_defaults = EdgeDefaults::default();
        if let Some(v) = lookup("DEFAULT_AMERICAN_ODDS") {
            let odds = v.parse::<f64>().map_err(|_| {
                AppError::Config("DEFAULT_AMERICAN_ODDS must be a number".to_string())
            })?;
            if !odds.is_finite() || odds.abs() < MIN_ODDS_MAGNITUDE {
                return Err(AppError::Config(format!(
                    "DEFAULT_AMERICAN_ODDS must have magnitude >= 100, got {odds}"
                )));
            }
            edge_defaults.american_odds = odds;
        }
        if let Some(v) = lookup("DEFAULT_PROJ_STD") {
            let std = v
                .parse::<f64>()
                .map_err(|_| AppError::Config("DEFAULT_PROJ_STD must be a number".to_string()))?;
            if !std.is_finite() || std <= 0.0 {
                return Err(AppError::Config(format!(
                    "DEFAULT_PROJ_STD must be positive, got {std}"
                )));
            }
            edge_defaults.proj_std = std;
        }

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            game_logs_path: lookup("GAME_LOGS_PATH")
                .unwrap_or_else(|| "data/player_game_logs.csv".to_string()),
            props_path: lookup("PROPS_PATH")
                .unwrap_or_else(|| "data/upcoming_props.csv".to_string()),
            models_dir: lookup("MODELS_DIR").unwrap_or_else(|| "models".to_string()),
            api_port,
            season_average_mode,
            edge_defaults,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let cfg = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.api_port, 3000);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.season_average_mode, SeasonAverageMode::FullHistory);
        assert_eq!(cfg.edge_defaults, EdgeDefaults::default());
        assert_eq!(cfg.edge_defaults.american_odds, -110.0);
        assert_eq!(cfg.edge_defaults.proj_std, 3.0);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("API_PORT", "8080"),
            ("SEASON_AVERAGE_MODE", "Expanding"),
            ("DEFAULT_AMERICAN_ODDS", "-120"),
            ("DEFAULT_PROJ_STD", "4.5"),
            ("MODELS_DIR", "/tmp/models"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_port, 8080);
        assert_eq!(cfg.season_average_mode, SeasonAverageMode::Expanding);
        assert_eq!(cfg.edge_defaults.american_odds, -120.0);
        assert_eq!(cfg.edge_defaults.proj_std, 4.5);
        assert_eq!(cfg.models_dir, "/tmp/models");
    }

    #[test]
    fn rejects_bad_port_and_bad_defaults() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("API_PORT", "http")])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("DEFAULT_AMERICAN_ODDS", "-50")])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("DEFAULT_PROJ_STD", "0")])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("SEASON_AVERAGE_MODE", "causal")])),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn edge_defaults_only_fill_missing_values() {
        let d = EdgeDefaults::default();
        assert_eq!(d.odds_or_default(None), -110.0);
        assert_eq!(d.odds_or_default(Some(150.0)), 150.0);
        assert_eq!(d.proj_std_or_default(None), 3.0);
        assert_eq!(d.proj_std_or_default(Some(4.0)), 4.0);
    }
}
