#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod builder;
mod checkers;
mod current;
mod error;
mod helpers;
mod parser;
mod percent_encode;
mod query;
mod scheme;
mod types;
mod url_components;
mod url_model;

// Public API
pub use current::{CurrentUrl, RequestInfo, RequestSource, ServerVariables};
pub use error::{Error, Result};
pub use query::{QueryMap, QueryValue};
pub use types::{BuildMode, Format};
pub use url_model::UrlModel;

/// Parse a URL string into a [`UrlModel`].
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] for malformed input.
pub fn parse(input: &str) -> Result<UrlModel> {
    UrlModel::parse(input)
}
