use std::path::Path;

use anyhow::{anyhow, Result};

use crate::cli::config::{
    config_hash, output_dir, resolve_config, resolve_output_file, CommandName, RunConfig,
};
use crate::cli::flags::Cli;
use crate::core::hash::{git_hash, hash_file};
use crate::core::time::now_utc;
use crate::core::types::{DashboardStats, Disaster, Manifest};
use crate::pipeline::collector::fetch_disasters;
use crate::pipeline::normalizer::NormalizeOptions;
use crate::pipeline::reporter::{write_disasters, write_manifest};
use crate::sources::eonet::EonetClient;
use crate::sources::fixture::FixtureFeed;
use crate::sources::EventFeedClient;

pub struct RunOutput {
    pub disasters: Vec<Disaster>,
    pub manifest: Manifest,
}

pub async fn run(cli: Cli) -> Result<()> {
    let cfg = resolve_config(&cli)?;
    let output = match cfg.command {
        CommandName::Fetch => run_fetch(&cfg).await?,
        CommandName::Replay => run_replay(&cfg).await?,
    };
    let json = serde_json::to_string_pretty(&output.disasters)?;
    println!("{json}");
    Ok(())
}

async fn run_fetch(cfg: &RunConfig) -> Result<RunOutput> {
    let feed = EonetClient::new(&cfg.app)?;
    run_with_feed(cfg, &feed).await
}

async fn run_replay(cfg: &RunConfig) -> Result<RunOutput> {
    let fixture = cfg
        .fixture
        .as_deref()
        .ok_or_else(|| anyhow!("replay requires --fixture"))?;
    run_replay_with_config(cfg, fixture).await
}

pub async fn run_replay_with_config(cfg: &RunConfig, fixture: &Path) -> Result<RunOutput> {
    let feed = FixtureFeed::new(fixture);
    run_with_feed(cfg, &feed).await
}

/// Fetch, normalize and write outputs. A failed fetch still writes an
/// empty snapshot and manifest.
pub async fn run_with_feed<F: EventFeedClient>(cfg: &RunConfig, feed: &F) -> Result<RunOutput> {
    let fetched_at = now_utc();
    let opts = NormalizeOptions::from_config(&cfg.app, fetched_at);
    let disasters = fetch_disasters(feed, &opts).await;

    let dir = output_dir(&cfg.output);
    std::fs::create_dir_all(&dir)?;
    let output_path = resolve_output_file(&cfg.output, cfg.format, "disasters");
    write_disasters(&disasters, cfg.format, &output_path)?;
    tracing::info!(
        "wrote {} disasters to {}",
        disasters.len(),
        output_path.display()
    );

    let manifest = Manifest {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: git_hash(),
        source: feed.source_name(),
        config_hash: config_hash(cfg),
        fetched_at,
        record_count: disasters.len(),
        output_file: output_path.to_string_lossy().to_string(),
        output_hash: hash_file(&output_path)?,
        stats: DashboardStats::from_disasters(&disasters),
    };
    let manifest_path = cfg
        .manifest
        .clone()
        .unwrap_or_else(|| dir.join("manifest.json"));
    write_manifest(&manifest, &manifest_path)?;

    Ok(RunOutput {
        disasters,
        manifest,
    })
}
