use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::features::engine::FEATURE_COLUMNS;
use crate::model::{model_inputs, ModelRegistry};
use crate::types::{FeatureRow, FeatureSource, Stat};

/// Games shown in the recent trend.
pub const TREND_GAMES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatProjection {
    pub stat: Stat,
    pub projection: f64,
}

/// One game of the recent trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub game_date: NaiveDate,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureValue {
    pub name: &'static str,
    pub value: f64,
}

/// Next-game projections for one player from their most recent feature row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProjection {
    pub player_name: String,
    /// Date of the feature row the projections were made from.
    pub as_of: NaiveDate,
    pub projections: Vec<StatProjection>,
    /// Stats with no registered model.
    pub unmodelled: Vec<Stat>,
    /// Oldest first.
    pub recent_games: Vec<TrendPoint>,
    /// Model input columns of the latest row, in `FEATURE_COLUMNS` order.
    pub feature_breakdown: Vec<FeatureValue>,
}

/// Projects every tracked stat for `player` from the latest of their rows in a
/// feature table (as built by `compute_features`).
///
/// A player with no rows is `InsufficientData`. A model that needs a column the
/// feature table does not have fails with `MissingFeature`.
pub fn project_player(
    features: &[FeatureRow],
    player: &str,
    models: &ModelRegistry,
) -> Result<PlayerProjection> {
    let mut games: Vec<&FeatureRow> = features.iter().filter(|r| r.player_name == player).collect();
    // stable, so same-date games keep table order and the last one is latest
    games.sort_by_key(|r| r.game_date);
    let Some(latest) = games.last().copied() else {
        return Err(AppError::InsufficientData(format!("no game logs for {player}")));
    };

    let mut projections = Vec::new();
    let mut unmodelled = Vec::new();
    for stat in Stat::ALL {
        match models.get(stat.as_str()) {
            Some(model) => {
                let inputs = model_inputs(model, latest)?;
                projections.push(StatProjection {
                    stat,
                    projection: model.predict(&inputs),
                });
            }
            None => unmodelled.push(stat),
        }
    }

    let recent_games = games[games.len().saturating_sub(TREND_GAMES)..]
        .iter()
        .map(|g| TrendPoint {
            game_date: g.game_date,
            points: g.points,
            rebounds: g.rebounds,
            assists: g.assists,
        })
        .collect();

    let feature_breakdown = FEATURE_COLUMNS
        .iter()
        .filter_map(|&name| latest.feature(name).map(|value| FeatureValue { name, value }))
        .collect();

    debug!(
        player,
        games = games.len(),
        as_of = %latest.game_date,
        projected = projections.len(),
        "projected player"
    );

    Ok(PlayerProjection {
        player_name: latest.player_name.clone(),
        as_of: latest.game_date,
        projections,
        unmodelled,
        recent_games,
        feature_breakdown,
    })
}

/// Distinct player names in a feature table, sorted.
pub fn players(features: &[FeatureRow]) -> Vec<String> {
    let mut names: Vec<String> = features.iter().map(|r| r.player_name.clone()).collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeasonAverageMode;
    use crate::features::compute_features;
    use crate::model::LinearModel;
    use crate::types::GameLogRow;

    fn logs() -> Vec<GameLogRow> {
        let mut rows: Vec<GameLogRow> = (1..=12)
            .map(|day| GameLogRow {
                player_name: "Tatum".to_string(),
                game_date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                points: 19.0 + day as f64,
                rebounds: 8.0,
                assists: 4.0,
                minutes: 36.0,
            })
            .collect();
        rows.insert(
            0,
            GameLogRow {
                player_name: "Brown".to_string(),
                game_date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
                points: 22.0,
                rebounds: 6.0,
                assists: 3.0,
                minutes: 33.0,
            },
        );
        rows
    }

    fn table() -> Vec<FeatureRow> {
        compute_features(&logs(), SeasonAverageMode::FullHistory).unwrap()
    }

    fn registry() -> ModelRegistry {
        ModelRegistry::new()
            .with_model("points", LinearModel::new("points", 0.0, [("points_rolling_5", 1.0)]))
            .with_model(
                "rebounds",
                LinearModel::new("rebounds", 1.0, [("rebounds_avg_season", 1.0)]),
            )
            .with_model("assists", LinearModel::new("assists", 0.0, [("form_score", 0.25)]))
    }

    #[test]
    fn projects_every_stat_from_the_latest_game() {
        let proj = project_player(&table(), "Tatum", &registry()).unwrap();
        assert_eq!(proj.as_of, NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
        assert!(proj.unmodelled.is_empty());

        let by_stat: Vec<(Stat, f64)> =
            proj.projections.iter().map(|p| (p.stat, p.projection)).collect();
        // last five games score 27..=31
        assert_eq!(by_stat[0], (Stat::Points, 29.0));
        assert_eq!(by_stat[1], (Stat::Rebounds, 9.0));
        assert_eq!(by_stat[2].0, Stat::Assists);
        // form = 0.5*29 + 0.3*8 + 0.2*4
        assert!((by_stat[2].1 - 0.25 * 17.7).abs() < 1e-9);
    }

    #[test]
    fn trend_is_the_last_ten_games_oldest_first() {
        let proj = project_player(&table(), "Tatum", &registry()).unwrap();
        assert_eq!(proj.recent_games.len(), TREND_GAMES);
        assert_eq!(proj.recent_games[0].game_date, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(proj.recent_games[9].points, 31.0);

        let short = project_player(&table(), "Brown", &registry()).unwrap();
        assert_eq!(short.recent_games.len(), 1);
    }

    #[test]
    fn breakdown_follows_the_model_input_columns() {
        let proj = project_player(&table(), "Tatum", &registry()).unwrap();
        let names: Vec<&str> = proj.feature_breakdown.iter().map(|f| f.name).collect();
        assert_eq!(names, FEATURE_COLUMNS.to_vec());
        let minutes = proj.feature_breakdown.iter().find(|f| f.name == "minutes").unwrap();
        assert_eq!(minutes.value, 36.0);
    }

    #[test]
    fn stats_without_a_model_are_listed() {
        let models = ModelRegistry::new()
            .with_model("points", LinearModel::new("points", 0.0, [("points_rolling_5", 1.0)]));
        let proj = project_player(&table(), "Brown", &models).unwrap();
        assert_eq!(proj.projections.len(), 1);
        assert_eq!(proj.unmodelled, vec![Stat::Rebounds, Stat::Assists]);
    }

    #[test]
    fn unknown_player_and_missing_columns_fail() {
        assert!(matches!(
            project_player(&table(), "Nobody", &registry()),
            Err(AppError::InsufficientData(_))
        ));
        let models = ModelRegistry::new()
            .with_model("points", LinearModel::new("points", 0.0, [("usage_rate", 1.0)]));
        assert!(matches!(
            project_player(&table(), "Tatum", &models),
            Err(AppError::MissingFeature(_))
        ));
    }

    #[test]
    fn players_are_distinct_and_sorted() {
        assert_eq!(players(&table()), vec!["Brown", "Tatum"]);
    }
}
