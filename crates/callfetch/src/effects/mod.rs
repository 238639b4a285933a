//! I/O side of a lifecycle.
//!
//! The transport is abstracted behind [`HttpClient`]; [`Fetcher`] drives the
//! hooks around a single call to it.

mod fetcher;
mod http;
mod mock;

pub use fetcher::Fetcher;
pub use http::HttpClient;
pub use mock::{MockHttpClient, RecordedRequest};

#[cfg(feature = "reqwest")]
pub use http::{ClientConfig, ReqwestClient};
