//! Async typeahead selector.
//!
//! [`Typeahead`] drives a [`typeahead_core::SelectorState`] on a tokio
//! runtime: it debounces keystrokes, calls the configured
//! [`SearchProvider`], drops responses that were overtaken by newer ones and
//! reports commits through an `on_change` callback.
//!
//! ```no_run
//! use std::sync::Arc;
//! use typeahead::{DefaultFormatter, NavKey, Typeahead, TypeaheadConfig};
//! use typeahead_client::{HttpSearchProvider, SearchEndpoint};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = HttpSearchProvider::new(SearchEndpoint::new("https://api.example.com/ports"))?;
//! let mut selector = Typeahead::new(
//!     TypeaheadConfig::default(),
//!     Some(Arc::new(provider)),
//!     Arc::new(DefaultFormatter),
//! );
//! selector.on_change(|change| println!("{change:?}"));
//!
//! selector.focus();
//! selector.input("rotter");
//! selector.settle().await;
//! selector.key(NavKey::Enter);
//! # Ok(())
//! # }
//! ```

mod config;
mod controller;

pub use config::{DEFAULT_DEBOUNCE_MS, TypeaheadConfig};
pub use controller::Typeahead;

pub use typeahead_client::{ClientError, SearchProvider};
pub use typeahead_core::{
    Change, Cursor, DefaultFormatter, DisplayFormatter, FieldFormatter, Hint, Mode, NavKey,
    Record, ResultSet, SelectOption, Selection, is_placeholder_id,
};
