//! Pure transformations for a lifecycle.
//!
//! Nothing here performs I/O: status classification and the branch stage that
//! turns a decoded body into a [`FetchOutcome`](crate::FetchOutcome).

mod settle;
mod status;

pub(crate) use settle::settle;
pub use status::is_success;
