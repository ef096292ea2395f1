//! tabfill-client talks to the remote completion service.
//!
//! [`CompletionService`] is the seam the TUI depends on; [`HttpCompletionClient`]
//! is the production implementation speaking plain HTTP/1.1 through
//! `hyper-util`'s pooled client.

pub mod error;
pub mod http;

pub use error::CompletionError;
pub use http::HttpCompletionClient;
pub use hyper::StatusCode;

use std::future::Future;
use tabfill_core::Query;

/// Something that turns partial text into a best-guess full value.
///
/// `Ok(None)` means the service answered but had no usable suggestion.
pub trait CompletionService: Send + Sync + 'static {
    fn complete(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<Option<String>, CompletionError>> + Send;
}
