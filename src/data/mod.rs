//! Flat-file ingest and export. Everything else in the crate works on
//! in-memory rows; this is the only module that touches CSV.

pub mod export;
pub mod game_logs;
pub mod props;

pub use export::{write_features, write_ranked_edges};
pub use game_logs::{load_game_logs, read_game_logs};
pub use props::{load_props, read_props};

use crate::error::{AppError, Result};

/// Index of each required column, or a schema error naming all absent ones.
/// Each entry is a list of accepted spellings for one column.
fn require_columns(headers: &csv::StringRecord, required: &[&[&str]]) -> Result<Vec<usize>> {
    let mut found = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for names in required {
        match headers.iter().position(|h| names.contains(&h)) {
            Some(i) => found.push(i),
            None => missing.push(names[0]),
        }
    }
    if !missing.is_empty() {
        return Err(AppError::Schema(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )));
    }
    Ok(found)
}

fn optional_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Blank cells are `None`; anything else must parse as a number.
fn parse_optional_f64(raw: Option<&str>, column: &str, line: u64) -> Result<Option<f64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse::<f64>().map(Some).map_err(|_| {
            AppError::Schema(format!("line {line}: {column} is not a number ('{v}')"))
        }),
    }
}

fn parse_required_f64(raw: Option<&str>, column: &str, line: u64) -> Result<f64> {
    parse_optional_f64(raw, column, line)?
        .ok_or_else(|| AppError::Schema(format!("line {line}: missing value for {column}")))
}
