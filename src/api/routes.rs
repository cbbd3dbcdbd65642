use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::EdgeDefaults;
use crate::edge::compute_prop_edge;
use crate::error::AppError;
use crate::features::{player_context, players, project_player, PlayerContext, PlayerProjection};
use crate::model::ModelRegistry;
use crate::slate::{rank_slate_rows, SlateFilter, SlateOptions, SlateReport};
use crate::types::{EdgeResult, FeatureRow, PropRow, Stat};

/// Slate, feature table and models are loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct ApiState {
    pub props: Arc<Vec<PropRow>>,
    /// Feature table built from the historical game logs.
    pub features: Arc<Vec<FeatureRow>>,
    pub models: Arc<ModelRegistry>,
    pub defaults: EdgeDefaults,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/slate", get(get_slate))
        .route("/slate/options", get(get_slate_options))
        .route("/edge", get(get_edge))
        .route("/players", get(get_players))
        .route("/player", get(get_player))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct EdgeQuery {
    pub player: String,
    pub prop_type: String,
    pub slate_date: Option<String>,
}

#[derive(Deserialize)]
pub struct PlayerQuery {
    pub player: String,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub props: usize,
    pub feature_rows: usize,
    pub models: Vec<String>,
}

#[derive(Serialize)]
pub struct EdgeResponse {
    pub player_name: String,
    pub team: String,
    pub opp_team: String,
    pub prop_type: String,
    pub line: f64,
    pub american_odds: f64,
    pub proj_std: f64,
    #[serde(flatten)]
    pub edge: EdgeResult,
    /// Only for prop types that map to a tracked stat.
    pub context: Option<PlayerContext>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        props: state.props.len(),
        feature_rows: state.features.len(),
        models: state.models.prop_types(),
    })
}

/// Ranked edges for the rows matching the filter. `row_index` values point
/// into the full loaded slate, not the filtered subset.
async fn get_slate(
    State(state): State<ApiState>,
    Query(filter): Query<SlateFilter>,
) -> Json<SlateReport> {
    Json(rank_slate_rows(filter.select(&state.props), &state.models, &state.defaults))
}

async fn get_slate_options(State(state): State<ApiState>) -> Json<SlateOptions> {
    Json(SlateOptions::from_rows(&state.props))
}

/// Edge for the first slate row matching player / prop type (/ date).
async fn get_edge(
    State(state): State<ApiState>,
    Query(params): Query<EdgeQuery>,
) -> Result<Json<EdgeResponse>, AppError> {
    let filter = SlateFilter {
        slate_date: params.slate_date,
        prop_type: Some(params.prop_type.clone()),
        player: Some(params.player.clone()),
    };
    let row = state
        .props
        .iter()
        .find(|r| filter.matches(r))
        .ok_or_else(|| {
            AppError::InsufficientData(format!(
                "no {} prop for {} on this slate",
                params.prop_type, params.player
            ))
        })?;

    let model = state
        .models
        .get(&row.prop_type)
        .ok_or_else(|| AppError::ModelNotFound(row.prop_type.clone()))?;

    let edge = compute_prop_edge(row, model, &state.defaults)?;

    Ok(Json(EdgeResponse {
        player_name: row.player_name.clone(),
        team: row.team.clone(),
        opp_team: row.opp_team.clone(),
        prop_type: row.prop_type.clone(),
        line: row.line,
        american_odds: state.defaults.odds_or_default(row.american_odds),
        proj_std: state.defaults.proj_std_or_default(row.proj_std),
        edge,
        context: Stat::parse(&row.prop_type).map(|stat| player_context(row, stat)),
    }))
}

async fn get_players(State(state): State<ApiState>) -> Json<Vec<String>> {
    Json(players(&state.features))
}

/// Next-game projections, recent trend and feature breakdown for one player.
async fn get_player(
    State(state): State<ApiState>,
    Query(params): Query<PlayerQuery>,
) -> Result<Json<PlayerProjection>, AppError> {
    let projection = project_player(&state.features, &params.player, &state.models)?;
    Ok(Json(projection))
}
