use std::fmt;

/// Stages of a lifecycle.
///
/// Every call moves through these stages in order:
/// Before → Transport → After → OnSuccess | OnError
///
/// A stage whose hook is absent still runs, as a no-op or identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The `before` hook, which may edit the request options.
    Before,

    /// Sending the request and decoding the body.
    Transport,

    /// The status-independent `after` hook.
    After,

    /// Body transform for a successful status.
    OnSuccess,

    /// Body transform for a failed status.
    OnError,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Before => write!(f, "before"),
            Stage::Transport => write!(f, "transport"),
            Stage::After => write!(f, "after"),
            Stage::OnSuccess => write!(f, "on_success"),
            Stage::OnError => write!(f, "on_error"),
        }
    }
}
