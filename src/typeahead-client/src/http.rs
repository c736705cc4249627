//! REST search provider.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use typeahead_core::Record;

use crate::endpoint::SearchEndpoint;
use crate::error::{ClientError, ClientResult};
use crate::response::decode_records;
use crate::SearchProvider;

/// Queries a REST endpoint with `GET <url>?<query_param>=<query>&<params>`.
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    client: reqwest::Client,
    endpoint: SearchEndpoint,
}

impl HttpSearchProvider {
    /// Create a provider for `endpoint`.
    ///
    /// Fails if the endpoint URL is not an absolute http(s) URL.
    pub fn new(endpoint: SearchEndpoint) -> ClientResult<Self> {
        endpoint.base_url()?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(endpoint.timeout())
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &SearchEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str) -> ClientResult<Vec<Record>> {
        let url = self.endpoint.request_url(query)?;
        debug!(%url, "Sending search request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let records = decode_records(value);
        debug!(count = records.len(), query, "Search returned records");
        Ok(records)
    }
}
