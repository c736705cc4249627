//! Search collaborator for the typeahead selector.
//!
//! The selector only needs one thing from the outside world: given the text
//! the user settled on, return an array of raw records. [`SearchProvider`] is
//! that seam. [`HttpSearchProvider`] queries a REST endpoint with `reqwest`;
//! [`StaticSearchProvider`] answers from an in-memory list.
//!
//! # Example
//!
//! ```no_run
//! use typeahead_client::{HttpSearchProvider, SearchEndpoint, SearchProvider};
//!
//! # async fn run() -> typeahead_client::ClientResult<()> {
//! let endpoint = SearchEndpoint::new("https://api.example.com/customers")
//!     .with_param("active", "true");
//! let provider = HttpSearchProvider::new(endpoint)?;
//!
//! for record in provider.search("acme").await? {
//!     println!("{record:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod endpoint;
mod error;
mod fixture;
mod http;
mod response;

use async_trait::async_trait;
use typeahead_core::Record;

pub use endpoint::{DEFAULT_QUERY_PARAM, SearchEndpoint};
pub use error::{ClientError, ClientResult};
pub use fixture::StaticSearchProvider;
pub use http::HttpSearchProvider;
pub use response::decode_records;

/// Something that can answer a typeahead query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for `query`, returning raw records in display order.
    async fn search(&self, query: &str) -> ClientResult<Vec<Record>>;
}
