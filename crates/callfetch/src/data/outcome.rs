use serde_json::Value;

use super::response::Response;

/// A completed lifecycle whose response had a success status.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessResponse<T, A> {
    pub response:   Response,
    /// Body after `on_success`.
    pub data:       T,
    /// Return of `after`, or `None` when no `after` hook was registered.
    pub after_data: Option<A>,
}

/// A completed lifecycle whose response had a failure status.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse<E, A> {
    pub response:   Response,
    /// Body after `on_error`.
    pub data:       E,
    /// Return of `after`, or `None` when no `after` hook was registered.
    pub after_data: Option<A>,
}

/// Result of a lifecycle that ran to completion.
///
/// Which variant is produced depends only on [`Response::ok`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T = Value, E = Value, A = ()> {
    Success(SuccessResponse<T, A>),
    Error(ErrorResponse<E, A>),
}

impl<T, E, A> FetchOutcome<T, E, A> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchOutcome::Error(_))
    }

    pub fn response(&self) -> &Response {
        match self {
            FetchOutcome::Success(success) => &success.response,
            FetchOutcome::Error(error) => &error.response,
        }
    }

    pub fn after_data(&self) -> Option<&A> {
        match self {
            FetchOutcome::Success(success) => success.after_data.as_ref(),
            FetchOutcome::Error(error) => error.after_data.as_ref(),
        }
    }

    /// Turn the outcome into a `Result`, with the error status on the `Err` side.
    pub fn into_result(self) -> Result<SuccessResponse<T, A>, ErrorResponse<E, A>> {
        match self {
            FetchOutcome::Success(success) => Ok(success),
            FetchOutcome::Error(error) => Err(error),
        }
    }
}
