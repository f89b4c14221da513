//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Nearby place search with full pagination
#[derive(Parser, Debug)]
#[command(name = "nearby-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API key (falls back to API_KEY, then the settings file)
    #[arg(long, global = true, env = "PLACES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Verbose output (debug logs, raw responses)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for places around a point, following every page
    Search(SearchArgs),

    /// Show the effective settings (API key redacted)
    ShowConfig,
}

/// Arguments for `search`
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Latitude of the center
    #[arg(allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the center
    #[arg(allow_hyphen_values = true)]
    pub lng: f64,

    /// Radius in meters (max 50000); omit with --rank-by-distance
    pub radius: Option<u32>,

    /// Order by distance instead of bounding by radius
    #[arg(long, conflicts_with = "radius")]
    pub rank_by_distance: bool,

    /// Filter by place types (comma-separated, e.g. 'hospital,pharmacy,doctor')
    #[arg(short, long)]
    pub types: Option<String>,

    /// Filter by keyword
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Maximum records to collect
    #[arg(long)]
    pub cap: Option<usize>,

    /// Wait before using a continuation token, in milliseconds
    #[arg(long)]
    pub page_delay_ms: Option<u64>,

    /// Retries per request or token
    #[arg(long)]
    pub max_retries: Option<u32>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Pretty-printed JSON array
    Pretty,
    /// Human-readable table
    Table,
}
