use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::flags::{Cli, Command};
use crate::config::{load_config, AppConfig};
use crate::core::hash::sha256_hex;
use crate::core::types::OutputFormat;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub command: CommandName,
    pub fixture: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: PathBuf,
    pub manifest: Option<PathBuf>,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Fetch,
    Replay,
}

pub fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let (command, fixture) = match &cli.command {
        Command::Fetch => (CommandName::Fetch, None),
        Command::Replay { fixture } => (CommandName::Replay, Some(fixture.clone())),
    };

    let mut app = load_config(cli.config.as_deref())?;
    apply_overrides(&mut app, cli.limit, cli.drop_unlocated);

    Ok(RunConfig {
        command,
        fixture,
        format: cli.format.clone().map(Into::into).unwrap_or(OutputFormat::Jsonl),
        output: cli.output.clone().unwrap_or_else(|| PathBuf::from("out")),
        manifest: cli.manifest.clone(),
        app,
    })
}

pub fn apply_overrides(app: &mut AppConfig, limit: Option<usize>, drop_unlocated: bool) {
    if let Some(limit) = limit {
        app.max_records = limit;
    }
    if drop_unlocated {
        app.drop_unlocated = true;
    }
}

pub fn config_hash(cfg: &RunConfig) -> String {
    let payload = serde_json::json!({
        "command": format!("{:?}", cfg.command),
        "format": format!("{:?}", cfg.format),
        "fixture": cfg.fixture.as_ref().map(|p| p.to_string_lossy().to_string()),
        "feed_url": cfg.app.feed_url,
        "query_limit": cfg.app.query_limit,
        "query_days": cfg.app.query_days,
        "max_records": cfg.app.max_records,
        "drop_unlocated": cfg.app.drop_unlocated,
    });
    sha256_hex(payload.to_string().as_bytes())
}

pub fn format_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Jsonl => "jsonl",
        OutputFormat::Markdown => "md",
        OutputFormat::Csv => "csv",
        OutputFormat::Geojson => "geojson",
    }
}

/// A path without extension (or an existing directory) is treated as an output directory.
pub fn output_dir(output: &Path) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.to_path_buf()
    } else {
        output
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("out"))
    }
}

pub fn resolve_output_file(output: &Path, format: OutputFormat, default_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", default_name, format_extension(format)))
    } else {
        output.to_path_buf()
    }
}
