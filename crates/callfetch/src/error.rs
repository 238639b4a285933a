//! Error types for callfetch.

use thiserror::Error;

use crate::data::{HookError, Stage};

pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level faults that end a lifecycle early.
///
/// An HTTP error status is never one of these; it is reported as
/// [`FetchOutcome::Error`](crate::FetchOutcome::Error).
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("response body is not valid JSON")]
    Decode(#[source] serde_json::Error),

    #[error("{stage} hook failed: {source}")]
    Hook {
        stage:  Stage,
        #[source]
        source: HookError,
    },
}

impl Error {
    pub(crate) fn hook(stage: Stage) -> impl FnOnce(HookError) -> Self {
        move |source| Error::Hook { stage, source }
    }

    /// The lifecycle stage the error was raised in.
    pub fn stage(&self) -> Stage {
        match self {
            Error::Transport(_) | Error::Decode(_) => Stage::Transport,
            Error::Hook { stage, .. } => *stage,
        }
    }
}

/// Failures of the bundled [`HttpClient`](crate::HttpClient) implementations.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request aborted")]
    Aborted,

    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    #[error("host unreachable: {0}")]
    Unreachable(String),

    #[cfg(feature = "reqwest")]
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}
