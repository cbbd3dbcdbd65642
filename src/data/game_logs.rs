use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::data::{parse_required_f64, require_columns};
use crate::error::{AppError, Result};
use crate::types::GameLogRow;

const REQUIRED: [&[&str]; 6] = [
    &["player_name"],
    &["game_date", "GAME_DATE"],
    &["points"],
    &["rebounds"],
    &["assists"],
    &["minutes"],
];

pub fn load_game_logs(path: impl AsRef<Path>) -> Result<Vec<GameLogRow>> {
    let path = path.as_ref();
    let rows = read_game_logs(File::open(path)?)?;
    info!("Loaded {} game log rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parses a game log CSV. Any absent column or blank / non-numeric stat
/// is a schema error; nothing is skipped.
pub fn read_game_logs<R: Read>(rdr: R) -> Result<Vec<GameLogRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = reader.headers()?.clone();
    let idx = require_columns(&headers, &REQUIRED)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = i as u64 + 2;

        let player_name = record.get(idx[0]).unwrap_or_default().to_string();
        if player_name.is_empty() {
            return Err(AppError::Schema(format!("line {line}: missing player_name")));
        }
        let raw_date = record.get(idx[1]).unwrap_or_default();
        let game_date = parse_game_date(raw_date).ok_or_else(|| {
            AppError::Schema(format!("line {line}: unparseable game_date '{raw_date}'"))
        })?;

        rows.push(GameLogRow {
            player_name,
            game_date,
            points: parse_required_f64(record.get(idx[2]), "points", line)?,
            rebounds: parse_required_f64(record.get(idx[3]), "rebounds", line)?,
            assists: parse_required_f64(record.get(idx[4]), "assists", line)?,
            minutes: parse_required_f64(record.get(idx[5]), "minutes", line)?,
        });
    }
    Ok(rows)
}

/// `YYYY-MM-DD` (a trailing time part is ignored) or `MM/DD/YYYY`.
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(day) = raw.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            return Some(d);
        }
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_with_upper_case_date_header() {
        let raw = "\
player_name,GAME_DATE,points,rebounds,assists,minutes,team
Jayson Tatum,2025-01-02,31,9,5,37.5,BOS
Jaylen Brown,2025-01-02T00:00:00,0,4,3,12,BOS
";
        let rows = read_game_logs(raw.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player_name, "Jayson Tatum");
        assert_eq!(rows[0].minutes, 37.5);
        assert_eq!(rows[1].points, 0.0);
        assert_eq!(rows[1].game_date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }

    #[test]
    fn missing_column_is_schema_error() {
        let raw = "player_name,game_date,points,rebounds,assists\nA,2025-01-01,1,2,3\n";
        match read_game_logs(raw.as_bytes()) {
            Err(AppError::Schema(msg)) => assert!(msg.contains("minutes"), "{msg}"),
            other => panic!("expected Schema, got {other:?}"),
        }
    }

    #[test]
    fn blank_stat_is_schema_error_not_nan() {
        let raw = "player_name,game_date,points,rebounds,assists,minutes\nA,2025-01-01,,2,3,30\n";
        match read_game_logs(raw.as_bytes()) {
            Err(AppError::Schema(msg)) => {
                assert!(msg.contains("line 2"), "{msg}");
                assert!(msg.contains("points"), "{msg}");
            }
            other => panic!("expected Schema, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_schema_error() {
        let raw = "player_name,game_date,points,rebounds,assists,minutes\nA,yesterday,1,2,3,30\n";
        assert!(matches!(read_game_logs(raw.as_bytes()), Err(AppError::Schema(_))));
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 14);
        assert_eq!(parse_game_date("2024-04-14"), expected);
        assert_eq!(parse_game_date("2024-04-14 19:30:00"), expected);
        assert_eq!(parse_game_date("04/14/2024"), expected);
        assert_eq!(parse_game_date("APR 14"), None);
    }
}
