use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::types::{FeatureRow, RankedEdge};

/// Writes the feature table with a header row.
pub fn write_features<W: Write>(rows: &[FeatureRow], w: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Display form of a ranked edge, rounded like the slate table.
#[derive(Debug, Serialize)]
struct EdgeCsvRow<'a> {
    player: &'a str,
    team: &'a str,
    opp: &'a str,
    prop: &'a str,
    line: f64,
    book_odds: f64,
    model_proj: f64,
    model_over_pct: f64,
    model_odds: i64,
    edge_pct: f64,
}

fn round_to(v: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}

/// Writes ranked edges in rank order with a header row.
pub fn write_ranked_edges<W: Write>(edges: &[RankedEdge], w: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    for e in edges {
        writer.serialize(EdgeCsvRow {
            player: &e.player_name,
            team: &e.team,
            opp: &e.opp_team,
            prop: &e.prop_type,
            line: e.line,
            book_odds: e.american_odds,
            model_proj: round_to(e.edge.projection, 2),
            model_over_pct: round_to(e.edge.prob_over_model * 100.0, 1),
            model_odds: e.edge.model_american_odds,
            edge_pct: round_to(e.edge.edge_pct, 1),
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeasonAverageMode;
    use crate::features::compute_features;
    use crate::types::{EdgeResult, GameLogRow};
    use chrono::NaiveDate;

    #[test]
    fn feature_table_has_header_and_iso_dates() {
        let logs = vec![GameLogRow {
            player_name: "A".to_string(),
            game_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            points: 20.0,
            rebounds: 10.0,
            assists: 5.0,
            minutes: 30.0,
        }];
        let rows = compute_features(&logs, SeasonAverageMode::FullHistory).unwrap();
        let mut buf = Vec::new();
        write_features(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("player_name,game_date,points"));
        assert!(header.ends_with("minutes_avg_season,form_score"));
        assert!(lines.next().unwrap().starts_with("A,2025-01-02,20.0"));
    }

    #[test]
    fn ranked_edges_are_rounded_for_display() {
        let edges = vec![RankedEdge {
            row_index: 0,
            player_name: "A".to_string(),
            team: "BOS".to_string(),
            opp_team: "NYK".to_string(),
            prop_type: "points".to_string(),
            line: 24.5,
            american_odds: -115.0,
            proj_std: 4.0,
            edge: EdgeResult {
                projection: 28.0123,
                prob_over_model: 0.802184,
                prob_over_implied: 0.534884,
                edge_pct: 26.73,
                model_american_odds: -406,
            },
        }];
        let mut buf = Vec::new();
        write_ranked_edges(&edges, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "player,team,opp,prop,line,book_odds,model_proj,model_over_pct,model_odds,edge_pct\n\
             A,BOS,NYK,points,24.5,-115.0,28.01,80.2,-406,26.7\n"
        );
    }
}
