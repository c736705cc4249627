//! Command-line host for the typeahead selector.
//!
//! - `cli` - argument parsing
//! - `config` - TOML file, environment and flag layering
//! - `logging` - tracing subscriber setup
//! - `*_cmd.rs` - subcommand implementations

pub mod cli;
pub mod config;
pub mod logging;
pub mod pick_cmd;
pub mod search_cmd;

use std::sync::Arc;

use anyhow::{Context, Result};
use typeahead::SearchProvider;
use typeahead_client::{HttpSearchProvider, StaticSearchProvider};

pub use cli::{Cli, Commands, dispatch_command};
pub use config::AppConfig;

/// Build the search collaborator the configuration names, if any.
///
/// A fixture file takes precedence over an endpoint.
pub fn build_provider(config: &AppConfig) -> Result<Option<Arc<dyn SearchProvider>>> {
    if let Some(path) = &config.fixture {
        let provider = StaticSearchProvider::load(path)
            .with_context(|| format!("Failed to load fixture {}", path.display()))?;
        tracing::info!(records = provider.len(), path = %path.display(), "Using fixture provider");
        return Ok(Some(Arc::new(provider)));
    }
    if let Some(endpoint) = &config.endpoint {
        let provider = HttpSearchProvider::new(endpoint.clone())
            .with_context(|| format!("Invalid search endpoint {}", endpoint.url))?;
        tracing::info!(url = %endpoint.url, "Using HTTP provider");
        return Ok(Some(Arc::new(provider)));
    }
    Ok(None)
}
