use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::types::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "disaster-watch",
    version,
    about = "Open hazard events from NASA EONET, normalized for maps and dashboards"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (TOML). Default: config/disaster-watch.toml
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormatArg>,

    /// Output path (file or directory)
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Manifest output path
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Keep at most this many of the newest events
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Drop events without coordinates instead of placing them at (0, 0)
    #[arg(long, global = true)]
    pub drop_unlocated: bool,

    /// Increase verbosity (debug, trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log file path
    #[arg(long, default_value = "data/disaster-watch.log", global = true)]
    pub log_file: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch open events from the live feed
    Fetch,
    /// Normalize a saved feed document instead of the live feed
    Replay {
        #[arg(long)]
        fixture: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Jsonl,
    Markdown,
    Csv,
    Geojson,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Jsonl => OutputFormat::Jsonl,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Geojson => OutputFormat::Geojson,
        }
    }
}
