//! Exception-to-result conversion for async computations.
//!
//! [`safe`] runs a zero-argument async computation and never lets a failure
//! escape to the caller. A computation fails in one of two ways:
//!
//! - it resolves to `Err(e)`, surfaced as [`Failure::Error`];
//! - it panics, either while the future is being built or while it is being
//!   polled, surfaced as [`Failure::Panic`].
//!
//! Anything else is returned unchanged as `Ok(value)`.
//!
//! ```
//! use callfetch_safe::{safe, Failure};
//!
//! # tokio_test_block(async {
//! let ok = safe(|| async { Ok::<_, std::io::Error>(42) }).await;
//! assert_eq!(ok.unwrap(), 42);
//!
//! let panicked = safe(|| async {
//!     if true { panic!("boom") }
//!     Ok::<u8, std::io::Error>(0)
//! })
//! .await;
//! assert!(matches!(panicked, Err(Failure::Panic { .. })));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod failure;

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures_util::FutureExt;

pub use failure::Failure;

/// Outcome of [`safe`]: the computation's value, or what went wrong.
pub type Safe<T, E> = Result<T, Failure<E>>;

/// Run `thunk` and convert every error or panic it produces into a [`Failure`].
pub async fn safe<T, E, F, Fut>(thunk: F) -> Safe<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let future = match panic::catch_unwind(AssertUnwindSafe(thunk)) {
        Ok(future) => future,
        Err(payload) => return Err(caught(payload)),
    };

    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(Failure::Error(error)),
        Err(payload) => Err(caught(payload)),
    }
}

fn caught<E>(payload: Box<dyn Any + Send>) -> Failure<E> {
    let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    tracing::warn!(%message, "caught panic in guarded computation");
    Failure::Panic { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct Refused(&'static str);

    impl fmt::Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "refused: {}", self.0)
        }
    }

    impl std::error::Error for Refused {}

    #[tokio::test]
    async fn passes_value_through() {
        let result = safe(|| async { Ok::<_, Refused>(vec![1, 2, 3]) }).await;
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn wraps_returned_error() {
        let result = safe(|| async { Err::<(), _>(Refused("host")) }).await;

        match result {
            Err(Failure::Error(error)) => assert_eq!(error, Refused("host")),
            other => panic!("expected Failure::Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn catches_panic_while_building_future() {
        let result = safe(|| -> std::future::Ready<Result<(), Refused>> {
            panic!("before the future exists")
        })
        .await;

        let failure = result.unwrap_err();
        assert!(failure.is_panic());
        assert_eq!(failure.panic_message(), Some("before the future exists"));
    }

    #[tokio::test]
    async fn catches_panic_after_suspension_point() {
        let result = safe(|| async {
            tokio::task::yield_now().await;
            let index = 7;
            if index > 3 {
                panic!("index {index} out of range");
            }
            Ok::<_, Refused>(index)
        })
        .await;

        assert_eq!(
            result.unwrap_err().panic_message(),
            Some("index 7 out of range")
        );
    }

    #[tokio::test]
    async fn reports_opaque_panic_payload() {
        let result = safe(|| async {
            if true {
                std::panic::panic_any(17_u32)
            }
            Ok::<(), Refused>(())
        })
        .await;

        assert_eq!(
            result.unwrap_err().panic_message(),
            Some("non-string panic payload")
        );
    }

    #[tokio::test]
    async fn captured_state_is_moved_into_thunk() {
        let owned = String::from("payload");
        let result = safe(move || async move { Ok::<_, Refused>(owned.len()) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn failure_accessors() {
        let failure: Failure<Refused> = Failure::Error(Refused("dns"));
        assert_eq!(failure.to_string(), "refused: dns");
        assert_eq!(failure.error(), Some(&Refused("dns")));
        assert_eq!(failure.panic_message(), None);

        let mapped = failure.map_err(|error| error.0.len());
        assert_eq!(mapped.into_error(), Some(3));

        let panicked: Failure<Refused> = Failure::Panic {
            message: "overflow".into(),
        };
        assert_eq!(panicked.to_string(), "computation panicked: overflow");
        assert!(panicked.error().is_none());
    }
}
