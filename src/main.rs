use anyhow::Result;
use std::path::PathBuf;
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use irvestats::config::{BoundarySource, PipelineConfig};
use irvestats::ingest::parse::ParserMode;
use irvestats::pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configuration, with env overrides ────────────────────────
    let mut config = PipelineConfig::default();
    if let Ok(url) = std::env::var("IRVE_DATASET_URL") {
        config.dataset_url = url;
    }
    if let Ok(path) = std::env::var("IRVE_BOUNDARY_PATH") {
        config.boundary = BoundarySource::Path(PathBuf::from(path));
    }
    if let Ok(url) = std::env::var("IRVE_BOUNDARY_URL") {
        config.boundary = BoundarySource::Url(url);
    }
    if std::env::var("IRVE_STRICT_PARSER").is_ok() {
        config.parser_mode = ParserMode::Strict;
    }
    if std::env::var("IRVE_INSECURE_TLS").is_ok() {
        config.fetch.insecure_tls = true;
    }

    // ─── 3) one pipeline run ─────────────────────────────────────────
    let pipeline = Pipeline::new(config)?;
    let start = Instant::now();
    let charts = pipeline.run().await?;
    info!(
        elapsed = ?start.elapsed(),
        years = charts.time_series.len(),
        regions = charts.regions.len(),
        stations = charts.free_paid.total(),
        "run complete"
    );

    // ─── 4) hand the summaries to the presentation layer ─────────────
    println!("{}", serde_json::to_string_pretty(&charts)?);
    Ok(())
}
