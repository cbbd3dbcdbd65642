use tracing::debug;

use crate::config::{form_weights, SeasonAverageMode, ROLLING_WINDOW};
use crate::error::{AppError, Result};
use crate::types::{FeatureRow, GameLogRow};

/// Model input columns, in the order models were trained on.
pub const FEATURE_COLUMNS: [&str; 10] = [
    // rolling
    "points_rolling_5",
    "rebounds_rolling_5",
    "assists_rolling_5",
    "minutes_rolling",
    // season
    "points_avg_season",
    "rebounds_avg_season",
    "assists_avg_season",
    "minutes_avg_season",
    // minutes & form
    "minutes",
    "form_score",
];

/// Weighted composite of the recent rolling means.
pub fn form_score(points_rolling: f64, rebounds_rolling: f64, assists_rolling: f64) -> f64 {
    points_rolling * form_weights::POINTS
        + rebounds_rolling * form_weights::REBOUNDS
        + assists_rolling * form_weights::ASSISTS
}

/// Trailing mean over the last `window` values, ending at and including each
/// index. Early positions average whatever history exists (min period 1).
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            // fresh sum per window: an all-zero window is exactly 0.0
            let slice = &values[i.saturating_sub(window - 1)..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Season average for each position under the chosen aggregation mode.
pub fn season_mean(values: &[f64], mode: SeasonAverageMode) -> Vec<f64> {
    match mode {
        SeasonAverageMode::FullHistory => {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            vec![mean; values.len()]
        }
        SeasonAverageMode::Expanding => {
            let mut sum = 0.0;
            values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    sum += v;
                    sum / (i + 1) as f64
                })
                .collect()
        }
    }
}

/// Builds the feature table from raw game logs.
///
/// Output is grouped by player (name order) and sorted by game date within
/// each player; games on the same date keep their input order. Row count
/// always equals the input row count.
pub fn compute_features(rows: &[GameLogRow], mode: SeasonAverageMode) -> Result<Vec<FeatureRow>> {
    for (i, row) in rows.iter().enumerate() {
        validate_row(i, row)?;
    }

    let mut order: Vec<usize> = (0..rows.len()).collect();
    // stable: same-date games keep ingestion order
    order.sort_by(|&a, &b| {
        rows[a]
            .player_name
            .cmp(&rows[b].player_name)
            .then(rows[a].game_date.cmp(&rows[b].game_date))
    });

    let mut out = Vec::with_capacity(rows.len());
    let mut players = 0usize;
    for group in order.chunk_by(|&a, &b| rows[a].player_name == rows[b].player_name) {
        players += 1;
        let games: Vec<&GameLogRow> = group.iter().map(|&i| &rows[i]).collect();
        out.extend(player_features(&games, mode)?);
    }

    debug!(rows = out.len(), players, season_mode = %mode, "computed feature table");
    Ok(out)
}

fn validate_row(index: usize, row: &GameLogRow) -> Result<()> {
    if row.player_name.trim().is_empty() {
        return Err(AppError::Schema(format!("row {index}: empty player_name")));
    }
    let stats = [
        ("points", row.points),
        ("rebounds", row.rebounds),
        ("assists", row.assists),
        ("minutes", row.minutes),
    ];
    for (name, v) in stats {
        if !v.is_finite() {
            return Err(AppError::Schema(format!(
                "row {index} ({}): missing or non-numeric {name}",
                row.player_name
            )));
        }
        if v < 0.0 {
            return Err(AppError::Schema(format!(
                "row {index} ({}): negative {name} ({v})",
                row.player_name
            )));
        }
    }
    Ok(())
}

/// Features for one player's games, already in date order.
fn player_features(games: &[&GameLogRow], mode: SeasonAverageMode) -> Result<Vec<FeatureRow>> {
    let column = |f: fn(&GameLogRow) -> f64| -> Vec<f64> { games.iter().map(|g| f(*g)).collect() };
    let points = column(|g| g.points);
    let rebounds = column(|g| g.rebounds);
    let assists = column(|g| g.assists);
    let minutes = column(|g| g.minutes);

    let points_rolling = rolling_mean(&points, ROLLING_WINDOW);
    let rebounds_rolling = rolling_mean(&rebounds, ROLLING_WINDOW);
    let assists_rolling = rolling_mean(&assists, ROLLING_WINDOW);
    let minutes_rolling = rolling_mean(&minutes, ROLLING_WINDOW);

    let points_season = season_mean(&points, mode);
    let rebounds_season = season_mean(&rebounds, mode);
    let assists_season = season_mean(&assists, mode);
    let minutes_season = season_mean(&minutes, mode);

    let mut out = Vec::with_capacity(games.len());
    for (i, game) in games.iter().enumerate() {
        let row = FeatureRow {
            player_name: game.player_name.clone(),
            game_date: game.game_date,
            points: game.points,
            rebounds: game.rebounds,
            assists: game.assists,
            minutes: game.minutes,
            points_rolling_5: points_rolling[i],
            rebounds_rolling_5: rebounds_rolling[i],
            assists_rolling_5: assists_rolling[i],
            minutes_rolling: minutes_rolling[i],
            points_avg_season: points_season[i],
            rebounds_avg_season: rebounds_season[i],
            assists_avg_season: assists_season[i],
            minutes_avg_season: minutes_season[i],
            form_score: form_score(points_rolling[i], rebounds_rolling[i], assists_rolling[i]),
        };
        let derived = [
            row.points_rolling_5,
            row.rebounds_rolling_5,
            row.assists_rolling_5,
            row.minutes_rolling,
            row.form_score,
        ];
        if derived.iter().any(|v| !v.is_finite()) {
            return Err(AppError::InsufficientData(format!(
                "{} on {}: rolling features could not be computed",
                row.player_name, row.game_date
            )));
        }
        out.push(row);
    }
    Ok(out)
}
