//! One HTTP request/response cycle wrapped in a fixed lifecycle of hooks.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Request options, responses, hook configuration and outcomes
//! - [`core`] - Pure transformations (status classification, branch stage)
//! - [`effects`] - Transport abstraction and the lifecycle orchestrator
//!
//! # Lifecycle
//!
//! Every call runs `before → transport → after → branch`, in that order, inside
//! [`callfetch_safe::safe`]:
//!
//! 1. `before` may edit the [`RequestOptions`] and returns a payload.
//! 2. The request is sent once and the body is decoded as JSON.
//! 3. `after` sees the response, the decoded body and the `before` payload.
//! 4. `on_success` or `on_error` transforms the body, chosen by `response.ok()`.
//!
//! An HTTP error status is ordinary data ([`FetchOutcome::Error`]). A failed
//! transport, an undecodable body, or a hook that fails or panics ends the
//! lifecycle with a [`Failure`].
//!
//! ```no_run
//! use callfetch::{Callbacks, FetchOutcome, Fetcher, ReqwestClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(ReqwestClient::new()?);
//! let callbacks = Callbacks::new()
//!     .before(|options| options.headers.push(("accept".into(), "application/json".into())))
//!     .after(|ctx| ctx.response.status());
//!
//! match fetcher.fetch_with_callbacks("https://example.com/todos/1", callbacks).await? {
//!     FetchOutcome::Success(ok) => println!("todo: {}", ok.data),
//!     FetchOutcome::Error(err) => println!("status {:?}: {}", err.after_data, err.data),
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use callfetch_safe::{Failure, Safe, safe};
pub use data::{
    AfterContext, Callbacks, ErrorResponse, FetchOutcome, HookError, Method, RequestOptions,
    Response, Stage, SuccessResponse,
};
pub use effects::{Fetcher, HttpClient, MockHttpClient, RecordedRequest};

#[cfg(feature = "reqwest")]
pub use effects::{ClientConfig, ReqwestClient};

pub use error::{Error, Result, TransportError};
