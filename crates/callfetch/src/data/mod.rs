//! Immutable data types for one request/response lifecycle.
//!
//! This module contains the per-call request options, the transport response,
//! the hook configuration and the discriminated outcome. None of these types
//! perform I/O.

pub mod callbacks;
pub mod options;
pub mod outcome;
pub mod response;
pub mod stage;

pub use callbacks::{AfterContext, Callbacks, HookError};
pub use options::{Method, RequestOptions};
pub use outcome::{ErrorResponse, FetchOutcome, SuccessResponse};
pub use response::Response;
pub use stage::Stage;
