use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use prop_edge::api::{router, ApiState};
use prop_edge::config::Config;
use prop_edge::data::{load_game_logs, load_props, write_features, write_ranked_edges};
use prop_edge::error::{AppError, Result};
use prop_edge::features::compute_features;
use prop_edge::model::{mean_absolute_error, ModelRegistry};
use prop_edge::slate::{rank_slate_rows, SlateFilter};
use prop_edge::types::{FeatureRow, Stat};

const USAGE: &str = "\
usage: propedge [command]

commands:
  serve                     JSON API over the upcoming slate (default)
  features [input] [output] build the feature table from game logs (output defaults to stdout)
  rank [prop_type]          print the ranked slate as CSV
  evaluate                  mean absolute error of each model on the game log features";

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(cfg, &args).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config, args: &[String]) -> Result<()> {
    let arg = |i: usize| args.get(i).map(String::as_str);
    match arg(0).unwrap_or("serve") {
        "serve" => serve(cfg).await,
        "features" => features(&cfg, arg(1), arg(2)),
        "rank" => rank(&cfg, arg(1)),
        "evaluate" => evaluate(&cfg),
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(AppError::Config(format!("unknown command '{other}'\n{USAGE}"))),
    }
}

fn load_models(cfg: &Config) -> Result<ModelRegistry> {
    let models = ModelRegistry::load_dir(&cfg.models_dir)?;
    if models.is_empty() {
        warn!("No models found in {}; every prop will be skipped", cfg.models_dir);
    }
    Ok(models)
}

/// Feature table for player projections. Without game logs the API still
/// serves the slate.
fn load_feature_table(cfg: &Config) -> Result<Vec<FeatureRow>> {
    if !Path::new(&cfg.game_logs_path).exists() {
        warn!("No game logs at {}; player projections are unavailable", cfg.game_logs_path);
        return Ok(Vec::new());
    }
    let logs = load_game_logs(&cfg.game_logs_path)?;
    compute_features(&logs, cfg.season_average_mode)
}

async fn serve(cfg: Config) -> Result<()> {
    let props = load_props(&cfg.props_path)?;
    let features = load_feature_table(&cfg)?;
    let models = load_models(&cfg)?;
    info!(
        "Serving {} props and {} feature rows with models for [{}] (default odds {:+.0}, default std {:.1})",
        props.len(),
        features.len(),
        models.prop_types().join(", "),
        cfg.edge_defaults.american_odds,
        cfg.edge_defaults.proj_std,
    );

    let app = router(ApiState {
        props: Arc::new(props),
        features: Arc::new(features),
        models: Arc::new(models),
        defaults: cfg.edge_defaults,
    });
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

fn features(cfg: &Config, input: Option<&str>, output: Option<&str>) -> Result<()> {
    let logs = load_game_logs(input.unwrap_or(&cfg.game_logs_path))?;
    let rows = compute_features(&logs, cfg.season_average_mode)?;
    match output {
        Some(path) => {
            write_features(&rows, std::fs::File::create(path)?)?;
            info!("Wrote {} feature rows to {path}", rows.len());
        }
        None => write_features(&rows, io::stdout().lock())?,
    }
    Ok(())
}

fn rank(cfg: &Config, prop_type: Option<&str>) -> Result<()> {
    let props = load_props(&cfg.props_path)?;
    let models = load_models(cfg)?;
    let filter = SlateFilter {
        prop_type: prop_type.map(str::to_string),
        ..Default::default()
    };
    let report = rank_slate_rows(filter.select(&props), &models, &cfg.edge_defaults);
    if report.edges.is_empty() {
        warn!("No props available with matching features and models");
    }
    for r in &report.rejected {
        info!("[SKIP] row {} {} {}: {}", r.row_index, r.player_name, r.prop_type, r.reason);
    }
    write_ranked_edges(&report.edges, io::stdout().lock())
}

fn evaluate(cfg: &Config) -> Result<()> {
    let logs = load_game_logs(&cfg.game_logs_path)?;
    let rows = compute_features(&logs, cfg.season_average_mode)?;
    let models = load_models(cfg)?;
    for stat in Stat::ALL {
        let Some(model) = models.get(stat.as_str()) else {
            continue;
        };
        let mae = mean_absolute_error(model, &rows, stat)?;
        info!(stat = %stat, rows = rows.len(), "{} MAE: {mae:.3}", stat.as_str().to_uppercase());
    }
    Ok(())
}
