use serde::Serialize;
use tracing::{info, warn};

use crate::config::EdgeDefaults;
use crate::edge::compute_prop_edge;
use crate::error::AppError;
use crate::model::ModelRegistry;
use crate::types::{PropRow, RankedEdge};

/// A slate row that did not make it into the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    /// Index in the loaded slate, as for [`RankedEdge::row_index`].
    pub row_index: usize,
    pub player_name: String,
    pub prop_type: String,
    pub reason: String,
}

/// Ranked edges plus an account of every row left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SlateReport {
    /// Sorted by `edge_pct` descending; equal edges keep slate order.
    pub edges: Vec<RankedEdge>,
    pub skipped_no_model: usize,
    pub skipped_missing_features: usize,
    pub rejected_invalid_odds: usize,
    pub rejected_domain: usize,
    pub rejected: Vec<RejectedRow>,
}

impl SlateReport {
    /// Rows skipped for lack of a model or a model input.
    pub fn skipped(&self) -> usize {
        self.skipped_no_model + self.skipped_missing_features
    }

    /// Every row not present in `edges`.
    pub fn excluded(&self) -> usize {
        self.rejected.len()
    }
}

/// Computes an edge for every row that has a model and all its inputs, then
/// ranks best edge first. Partial data never fails the slate: rows without
/// a model, with missing features, or with out-of-domain odds are counted
/// and listed in the report instead.
pub fn rank_edges(rows: &[PropRow], models: &ModelRegistry, defaults: &EdgeDefaults) -> SlateReport {
    rank_slate_rows(rows.iter().enumerate(), models, defaults)
}

/// [`rank_edges`] over a subset of a slate. Each row carries its index in the
/// full slate, and that index is what `row_index` reports.
pub fn rank_slate_rows<'a>(
    rows: impl IntoIterator<Item = (usize, &'a PropRow)>,
    models: &ModelRegistry,
    defaults: &EdgeDefaults,
) -> SlateReport {
    let mut report = SlateReport::default();
    let mut seen = 0usize;

    for (row_index, row) in rows {
        seen += 1;
        let exclude = |report: &mut SlateReport, reason: String| {
            warn!(
                row = row_index,
                player = %row.player_name,
                prop_type = %row.prop_type,
                "Excluding slate row: {reason}"
            );
            report.rejected.push(RejectedRow {
                row_index,
                player_name: row.player_name.clone(),
                prop_type: row.prop_type.clone(),
                reason,
            });
        };

        let Some(model) = models.get(&row.prop_type) else {
            report.skipped_no_model += 1;
            exclude(&mut report, format!("no trained model for {}", row.prop_type));
            continue;
        };

        match compute_prop_edge(row, model, defaults) {
            Ok(edge) => report.edges.push(RankedEdge {
                row_index,
                player_name: row.player_name.clone(),
                team: row.team.clone(),
                opp_team: row.opp_team.clone(),
                prop_type: row.prop_type.clone(),
                line: row.line,
                american_odds: defaults.odds_or_default(row.american_odds),
                proj_std: defaults.proj_std_or_default(row.proj_std),
                edge,
            }),
            Err(e) => {
                match &e {
                    AppError::MissingFeature(_) => report.skipped_missing_features += 1,
                    AppError::InvalidOdds(_) => report.rejected_invalid_odds += 1,
                    _ => report.rejected_domain += 1,
                }
                exclude(&mut report, e.to_string());
            }
        }
    }

    // sort_by is stable, so ties keep slate order
    report
        .edges
        .sort_by(|a, b| b.edge.edge_pct.total_cmp(&a.edge.edge_pct));

    info!(
        ranked = report.edges.len(),
        no_model = report.skipped_no_model,
        missing_features = report.skipped_missing_features,
        invalid_odds = report.rejected_invalid_odds,
        domain = report.rejected_domain,
        "Ranked slate of {seen} rows"
    );

    report
}
