//! Where and how to send a query.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Query-string parameter carrying the search term unless overridden.
pub const DEFAULT_QUERY_PARAM: &str = "search";

/// A REST search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEndpoint {
    /// Base URL; the query term is appended as a query parameter.
    pub url: String,

    /// Name of the parameter carrying the query term.
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// Extra parameters appended to every request.
    #[serde(default)]
    pub additional_params: BTreeMap<String, String>,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_query_param() -> String {
    DEFAULT_QUERY_PARAM.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl SearchEndpoint {
    /// Creates an endpoint with default parameter naming.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query_param: default_query_param(),
            additional_params: BTreeMap::new(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Sets the query-term parameter name.
    pub fn with_query_param(mut self, name: impl Into<String>) -> Self {
        self.query_param = name.into();
        self
    }

    /// Adds a fixed parameter sent with every request.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_params.insert(key.into(), value.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses and validates the base URL.
    pub fn base_url(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.url).map_err(|e| ClientError::invalid_endpoint(&self.url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::invalid_endpoint(
                &self.url,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(url)
    }

    /// Full request URL for `query`.
    pub fn request_url(&self, query: &str) -> ClientResult<Url> {
        let mut url = self.base_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(&self.query_param, query);
            for (key, value) in &self.additional_params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
