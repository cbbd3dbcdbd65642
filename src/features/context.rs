use serde::Serialize;

use crate::types::{FeatureSource, Stat};

/// Recent-form summary shown next to a single prop's edge.
/// Values are `None` when the slate row did not carry that column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerContext {
    pub stat: Stat,
    pub season_avg: Option<f64>,
    pub last5_avg: Option<f64>,
    pub minutes_last5: Option<f64>,
    pub form_score: Option<f64>,
}

pub fn player_context(source: &impl FeatureSource, stat: Stat) -> PlayerContext {
    PlayerContext {
        stat,
        season_avg: source.feature(stat.season_column()),
        last5_avg: source.feature(stat.rolling_column()),
        minutes_last5: source.feature("minutes_rolling"),
        form_score: source.feature("form_score"),
    }
}
