use serde::{Deserialize, Serialize};

use crate::types::PropRow;

/// Narrows a slate the way the dashboard sidebar does. `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SlateFilter {
    pub slate_date: Option<String>,
    pub prop_type: Option<String>,
    pub player: Option<String>,
}

impl SlateFilter {
    pub fn matches(&self, row: &PropRow) -> bool {
        let date_ok = self
            .slate_date
            .as_deref()
            .map_or(true, |d| row.slate_date.as_deref() == Some(d));
        let prop_ok = self
            .prop_type
            .as_deref()
            .map_or(true, |p| row.prop_type.eq_ignore_ascii_case(p));
        let player_ok = self
            .player
            .as_deref()
            .map_or(true, |p| row.player_name == p);
        date_ok && prop_ok && player_ok
    }

    /// Matching rows with their slate index, in slate order.
    pub fn select<'a>(
        &'a self,
        rows: &'a [PropRow],
    ) -> impl Iterator<Item = (usize, &'a PropRow)> + 'a {
        rows.iter().enumerate().filter(move |(_, r)| self.matches(r))
    }
}

/// Distinct selector values present in a slate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlateOptions {
    pub slate_dates: Vec<String>,
    pub prop_types: Vec<String>,
    pub players: Vec<String>,
}

impl SlateOptions {
    pub fn from_rows(rows: &[PropRow]) -> Self {
        fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
            let mut v: Vec<String> = values.collect();
            v.sort();
            v.dedup();
            v
        }
        Self {
            slate_dates: distinct(rows.iter().filter_map(|r| r.slate_date.clone())),
            prop_types: distinct(rows.iter().map(|r| r.prop_type.clone())),
            players: distinct(rows.iter().map(|r| r.player_name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player: &str, prop_type: &str, date: Option<&str>) -> PropRow {
        PropRow {
            player_name: player.to_string(),
            prop_type: prop_type.to_string(),
            slate_date: date.map(str::to_string),
            line: 10.5,
            ..Default::default()
        }
    }

    fn slate() -> Vec<PropRow> {
        vec![
            row("Tatum", "points", Some("2025-01-02")),
            row("Brown", "rebounds", Some("2025-01-02")),
            row("Tatum", "assists", Some("2025-01-03")),
            row("Holiday", "points", None),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(SlateFilter::default().select(&slate()).count(), 4);
    }

    #[test]
    fn filters_combine() {
        let filter = SlateFilter {
            slate_date: Some("2025-01-02".to_string()),
            prop_type: Some("Points".to_string()),
            player: None,
        };
        let rows = slate();
        let out: Vec<(usize, &PropRow)> = filter.select(&rows).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, 0);
        assert_eq!(out[0].1.player_name, "Tatum");
    }

    #[test]
    fn dated_filter_excludes_undated_rows() {
        let filter = SlateFilter {
            slate_date: Some("2025-01-03".to_string()),
            ..Default::default()
        };
        let rows = slate();
        let out: Vec<(usize, &PropRow)> = filter.select(&rows).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, 2);
        assert_eq!(out[0].1.prop_type, "assists");
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        let opts = SlateOptions::from_rows(&slate());
        assert_eq!(opts.slate_dates, vec!["2025-01-02", "2025-01-03"]);
        assert_eq!(opts.prop_types, vec!["assists", "points", "rebounds"]);
        assert_eq!(opts.players, vec!["Brown", "Holiday", "Tatum"]);
    }
}
