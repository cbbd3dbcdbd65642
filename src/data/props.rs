use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::data::{optional_column, parse_optional_f64, parse_required_f64, require_columns};
use crate::error::{AppError, Result};
use crate::types::PropRow;

const REQUIRED: [&[&str]; 3] = [&["player_name"], &["prop_type"], &["line"]];

const IDENTITY_COLUMNS: [&str; 8] = [
    "player_name",
    "prop_type",
    "line",
    "team",
    "opp_team",
    "slate_date",
    "american_odds",
    "proj_std",
];

pub fn load_props(path: impl AsRef<Path>) -> Result<Vec<PropRow>> {
    let path = path.as_ref();
    let rows = read_props(File::open(path)?)?;
    info!("Loaded {} props from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parses an upcoming-props CSV.
///
/// `player_name`, `prop_type` and `line` are required. Blank `american_odds`
/// or `proj_std` cells stay `None` so defaults can be applied later. Every
/// other column is a candidate feature: numeric cells are kept, blank or
/// text cells are left out and surface later as missing features.
pub fn read_props<R: Read>(rdr: R) -> Result<Vec<PropRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = reader.headers()?.clone();
    let idx = require_columns(&headers, &REQUIRED)?;
    let team = optional_column(&headers, "team");
    let opp_team = optional_column(&headers, "opp_team");
    let slate_date = optional_column(&headers, "slate_date");
    let odds = optional_column(&headers, "american_odds");
    let proj_std = optional_column(&headers, "proj_std");

    let feature_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !IDENTITY_COLUMNS.contains(h))
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let text = |record: &csv::StringRecord, col: Option<usize>| -> String {
        col.and_then(|i| record.get(i)).unwrap_or_default().to_string()
    };

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = i as u64 + 2;

        let player_name = text(&record, Some(idx[0]));
        let prop_type = text(&record, Some(idx[1])).to_ascii_lowercase();
        if player_name.is_empty() || prop_type.is_empty() {
            return Err(AppError::Schema(format!(
                "line {line}: player_name and prop_type are required"
            )));
        }

        let mut features = HashMap::new();
        for (col, name) in &feature_columns {
            match record.get(*col).map(str::parse::<f64>) {
                Some(Ok(v)) if v.is_finite() => {
                    features.insert(name.clone(), v);
                }
                _ => debug!(line, column = %name, "no numeric value"),
            }
        }

        let date = text(&record, slate_date);
        rows.push(PropRow {
            player_name,
            team: text(&record, team),
            opp_team: text(&record, opp_team),
            slate_date: (!date.is_empty()).then_some(date),
            prop_type,
            line: parse_required_f64(record.get(idx[2]), "line", line)?,
            american_odds: parse_optional_f64(odds.and_then(|c| record.get(c)), "american_odds", line)?,
            proj_std: parse_optional_f64(proj_std.and_then(|c| record.get(c)), "proj_std", line)?,
            features,
        });
    }
    Ok(rows)
}
