use thiserror::Error;

/// What a guarded computation produced instead of a value.
#[derive(Debug, Error)]
pub enum Failure<E> {
    /// The computation completed with an error.
    #[error(transparent)]
    Error(E),

    /// The computation panicked.
    #[error("computation panicked: {message}")]
    Panic { message: String },
}

impl<E> Failure<E> {
    pub fn is_panic(&self) -> bool {
        matches!(self, Failure::Panic { .. })
    }

    /// The error the computation returned, if it did not panic.
    pub fn error(&self) -> Option<&E> {
        match self {
            Failure::Error(error) => Some(error),
            Failure::Panic { .. } => None,
        }
    }

    pub fn into_error(self) -> Option<E> {
        match self {
            Failure::Error(error) => Some(error),
            Failure::Panic { .. } => None,
        }
    }

    pub fn panic_message(&self) -> Option<&str> {
        match self {
            Failure::Error(_) => None,
            Failure::Panic { message } => Some(message),
        }
    }

    /// Convert the error type, keeping panics as they are.
    pub fn map_err<F, O>(self, op: O) -> Failure<F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            Failure::Error(error) => Failure::Error(op(error)),
            Failure::Panic { message } => Failure::Panic { message },
        }
    }
}
