use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Stat
// ---------------------------------------------------------------------------

/// Box-score stats that carry a projection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Points,
    Rebounds,
    Assists,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Points, Stat::Rebounds, Stat::Assists];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Points => "points",
            Stat::Rebounds => "rebounds",
            Stat::Assists => "assists",
        }
    }

    pub fn parse(s: &str) -> Option<Stat> {
        match s.trim().to_ascii_lowercase().as_str() {
            "points" => Some(Stat::Points),
            "rebounds" => Some(Stat::Rebounds),
            "assists" => Some(Stat::Assists),
            _ => None,
        }
    }

    pub fn rolling_column(&self) -> &'static str {
        match self {
            Stat::Points => "points_rolling_5",
            Stat::Rebounds => "rebounds_rolling_5",
            Stat::Assists => "assists_rolling_5",
        }
    }

    pub fn season_column(&self) -> &'static str {
        match self {
            Stat::Points => "points_avg_season",
            Stat::Rebounds => "rebounds_avg_season",
            Stat::Assists => "assists_avg_season",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Game logs and features
// ---------------------------------------------------------------------------

/// One player's box score for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogRow {
    pub player_name: String,
    pub game_date: NaiveDate,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub minutes: f64,
}

/// A game log row extended with rolling, season and form features.
/// Flat so it serializes straight to a CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub player_name: String,
    pub game_date: NaiveDate,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub minutes: f64,
    pub points_rolling_5: f64,
    pub rebounds_rolling_5: f64,
    pub assists_rolling_5: f64,
    pub minutes_rolling: f64,
    pub points_avg_season: f64,
    pub rebounds_avg_season: f64,
    pub assists_avg_season: f64,
    pub minutes_avg_season: f64,
    pub form_score: f64,
}

impl FeatureRow {
    /// Actual box-score value of `stat` in this game.
    pub fn stat(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Points => self.points,
            Stat::Rebounds => self.rebounds,
            Stat::Assists => self.assists,
        }
    }
}

/// Anything a model can read named numeric features from.
pub trait FeatureSource {
    fn feature(&self, name: &str) -> Option<f64>;
}

impl FeatureSource for FeatureRow {
    fn feature(&self, name: &str) -> Option<f64> {
        let v = match name {
            "points" => self.points,
            "rebounds" => self.rebounds,
            "assists" => self.assists,
            "minutes" => self.minutes,
            "points_rolling_5" => self.points_rolling_5,
            "rebounds_rolling_5" => self.rebounds_rolling_5,
            "assists_rolling_5" => self.assists_rolling_5,
            "minutes_rolling" => self.minutes_rolling,
            "points_avg_season" => self.points_avg_season,
            "rebounds_avg_season" => self.rebounds_avg_season,
            "assists_avg_season" => self.assists_avg_season,
            "minutes_avg_season" => self.minutes_avg_season,
            "form_score" => self.form_score,
            _ => return None,
        };
        Some(v)
    }
}

impl FeatureSource for HashMap<String, f64> {
    fn feature(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// One prop on the slate: identity, market, and whatever feature columns the
/// source file carried. `prop_type` stays a string so props without a trained
/// model can be reported instead of rejected at ingest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropRow {
    pub player_name: String,
    pub team: String,
    pub opp_team: String,
    pub slate_date: Option<String>,
    pub prop_type: String,
    pub line: f64,
    pub american_odds: Option<f64>,
    pub proj_std: Option<f64>,
    pub features: HashMap<String, f64>,
}

impl FeatureSource for PropRow {
    fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }
}

// ---------------------------------------------------------------------------
// Edge output
// ---------------------------------------------------------------------------

/// Model vs book comparison for the over side of one prop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeResult {
    pub projection: f64,
    pub prob_over_model: f64,
    pub prob_over_implied: f64,
    pub edge_pct: f64,
    pub model_american_odds: i64,
}

/// An edge with the identity of the slate row it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEdge {
    /// Index of the row in the loaded slate, also when ranking a filtered subset.
    pub row_index: usize,
    pub player_name: String,
    pub team: String,
    pub opp_team: String,
    pub prop_type: String,
    pub line: f64,
    /// Book odds after defaults were applied.
    pub american_odds: f64,
    pub proj_std: f64,
    #[serde(flatten)]
    pub edge: EdgeResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_row() -> FeatureRow {
        FeatureRow {
            player_name: "A".to_string(),
            game_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            points: 20.0,
            rebounds: 10.0,
            assists: 5.0,
            minutes: 34.5,
            points_rolling_5: 21.0,
            rebounds_rolling_5: 9.0,
            assists_rolling_5: 6.0,
            minutes_rolling: 33.0,
            points_avg_season: 22.0,
            rebounds_avg_season: 8.0,
            assists_avg_season: 7.0,
            minutes_avg_season: 32.0,
            form_score: 14.4,
        }
    }

    #[test]
    fn stat_parse_and_columns() {
        assert_eq!(Stat::parse(" Points "), Some(Stat::Points));
        assert_eq!(Stat::parse("threes"), None);
        assert_eq!(Stat::Rebounds.rolling_column(), "rebounds_rolling_5");
        assert_eq!(Stat::Assists.season_column(), "assists_avg_season");
        assert_eq!(Stat::Points.to_string(), "points");
    }

    #[test]
    fn feature_row_resolves_named_columns() {
        let row = feature_row();
        assert_eq!(row.feature("minutes"), Some(34.5));
        assert_eq!(row.feature("minutes_avg_season"), Some(32.0));
        assert_eq!(row.feature("form_score"), Some(14.4));
        assert_eq!(row.feature("player_name"), None);
        assert_eq!(row.feature("usage_rate"), None);
    }

    #[test]
    fn feature_row_exposes_actual_stats() {
        let row = feature_row();
        assert_eq!(row.stat(Stat::Points), 20.0);
        assert_eq!(row.stat(Stat::Rebounds), 10.0);
        assert_eq!(row.stat(Stat::Assists), 5.0);
    }

    #[test]
    fn ranked_edge_serializes_flat() {
        let ranked = RankedEdge {
            row_index: 0,
            player_name: "A".to_string(),
            team: "BOS".to_string(),
            opp_team: "NYK".to_string(),
            prop_type: "points".to_string(),
            line: 24.5,
            american_odds: -110.0,
            proj_std: 3.0,
            edge: EdgeResult {
                projection: 26.0,
                prob_over_model: 0.6,
                prob_over_implied: 0.52,
                edge_pct: 8.0,
                model_american_odds: -150,
            },
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["edge_pct"], 8.0);
        assert_eq!(json["model_american_odds"], -150);
        assert!(json.get("edge").is_none());
    }
}
