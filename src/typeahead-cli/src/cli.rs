//! Command-line arguments and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::AppConfig;
use crate::{logging, pick_cmd, search_cmd};

/// Typeahead selector host
#[derive(Debug, Parser)]
#[command(name = "typeahead")]
#[command(about = "Pick a record from a remote catalog by typing part of its name")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: <config dir>/typeahead/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level, unless RUST_LOG is set
    #[arg(
        long,
        global = true,
        env = "TYPEAHEAD_LOG_LEVEL",
        value_enum,
        default_value_t = LogLevel::Warn
    )]
    pub log_level: LogLevel,

    /// Log file for the interactive picker
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive picker; prints the committed change as JSON
    Pick(PickArgs),
    /// One-shot query; prints matching options as JSON lines
    Search(SearchArgs),
}

/// Where queries go.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Search endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Query-string parameter carrying the search term
    #[arg(long)]
    pub query_param: Option<String>,

    /// Extra query parameter sent with every request (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Answer queries from a JSON file instead of an endpoint
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Characters required before searching
    #[arg(long)]
    pub min_length: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct PickArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Identifier of the current selection
    #[arg(long)]
    pub value: Option<String>,

    /// Label of the current selection
    #[arg(long)]
    pub display_value: Option<String>,

    /// Include the raw record in the printed change
    #[arg(long)]
    pub passthrough: bool,

    /// Label shown before the input
    #[arg(long, default_value = "Select:")]
    pub label: String,

    /// Quiet interval before searching, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Text to search for
    pub query: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Load configuration, install logging and run the chosen subcommand.
pub async fn dispatch_command(cli: Cli) -> Result<()> {
    let mut config = AppConfig::discover(cli.config.as_deref())?;
    config.apply_env()?;

    match cli.command {
        Commands::Pick(args) => {
            config.apply_source(&args.source)?;
            config.apply_pick(&args);
            let _guard = logging::init_file(cli.log_level, cli.log_file.as_deref())?;
            pick_cmd::run(args, config).await
        }
        Commands::Search(args) => {
            config.apply_source(&args.source)?;
            logging::init_stderr(cli.log_level);
            search_cmd::run(args, config).await
        }
    }
}
