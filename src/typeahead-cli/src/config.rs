//! Layered configuration: TOML file, then environment, then flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use typeahead::TypeaheadConfig;
use typeahead_client::SearchEndpoint;

use crate::cli::{PickArgs, SourceArgs};

/// Environment variable overriding the endpoint URL.
pub const ENV_ENDPOINT: &str = "TYPEAHEAD_ENDPOINT";
/// Environment variable overriding the minimum search length.
pub const ENV_MIN_LENGTH: &str = "TYPEAHEAD_MIN_LENGTH";

/// Everything the host needs to build a selector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `[endpoint]` table.
    pub endpoint: Option<SearchEndpoint>,
    /// `[selector]` table.
    pub selector: TypeaheadConfig,
    /// JSON file answering queries instead of the endpoint.
    pub fixture: Option<PathBuf>,
}

impl AppConfig {
    /// `<config dir>/typeahead/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("typeahead").join("config.toml"))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load `explicit`, or the default file when it exists, or defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply `TYPEAHEAD_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(ENV_ENDPOINT).filter(|url| !url.is_empty()) {
            self.set_endpoint_url(url);
            self.fixture = None;
        }
        if let Some(min) = lookup(ENV_MIN_LENGTH) {
            self.selector.min_search_length = min
                .trim()
                .parse()
                .with_context(|| format!("{ENV_MIN_LENGTH} must be a number, got '{min}'"))?;
        }
        Ok(())
    }

    /// Apply endpoint and search flags.
    pub fn apply_source(&mut self, args: &SourceArgs) -> Result<()> {
        if let Some(url) = &args.endpoint {
            self.set_endpoint_url(url.clone());
        }
        match (&args.fixture, &args.endpoint) {
            (Some(path), _) => self.fixture = Some(path.clone()),
            // An endpoint flag outranks a fixture named in the config file.
            (None, Some(_)) => self.fixture = None,
            (None, None) => {}
        }
        if let Some(min) = args.min_length {
            self.selector.min_search_length = min;
        }

        let needs_endpoint = args.query_param.is_some() || !args.params.is_empty();
        match self.endpoint.as_mut() {
            Some(endpoint) => {
                if let Some(name) = &args.query_param {
                    endpoint.query_param.clone_from(name);
                }
                for (key, value) in &args.params {
                    endpoint
                        .additional_params
                        .insert(key.clone(), value.clone());
                }
            }
            None if needs_endpoint => bail!("--param and --query-param need an endpoint"),
            None => {}
        }
        Ok(())
    }

    /// Apply picker-only flags.
    pub fn apply_pick(&mut self, args: &PickArgs) {
        if args.passthrough {
            self.selector.passthrough_records = true;
        }
        if let Some(ms) = args.debounce_ms {
            self.selector.debounce_ms = ms;
        }
    }

    fn set_endpoint_url(&mut self, url: String) {
        match self.endpoint.as_mut() {
            Some(endpoint) => endpoint.url = url,
            None => self.endpoint = Some(SearchEndpoint::new(url)),
        }
    }
}
