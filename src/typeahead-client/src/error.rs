//! Error types for search calls.

use std::path::PathBuf;

/// Result type alias for search operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while querying a search collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured endpoint is not a usable URL.
    #[error("Invalid search endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Transport-level failure.
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Search endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not JSON.
    #[error("Search response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A fixture file could not be read.
    #[error("Failed to read fixture '{path}': {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Creates a new `InvalidEndpoint` error.
    pub fn invalid_endpoint(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidEndpoint {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::invalid_endpoint("not a url", "relative URL without a base");
        assert!(err.to_string().contains("not a url"));

        let err = ClientError::Status {
            status: 503,
            body: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "Search endpoint returned 503: maintenance");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
