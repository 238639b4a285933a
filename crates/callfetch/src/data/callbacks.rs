//! The per-call lifecycle configuration.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::options::RequestOptions;
use super::response::Response;

/// Error type returned by fallible hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

pub(crate) type BeforeHook<B> =
    Box<dyn FnOnce(&mut RequestOptions) -> Result<B, HookError> + Send>;
pub(crate) type AfterHook<B, A> =
    Box<dyn FnOnce(AfterContext<'_, B>) -> Result<A, HookError> + Send>;
pub(crate) type BodyHook<T> = Box<dyn FnOnce(&Response, Value) -> Result<T, HookError> + Send>;

/// What the `after` hook receives.
#[derive(Debug)]
pub struct AfterContext<'a, B> {
    /// The raw transport response.
    pub response: &'a Response,

    /// The decoded body, before any success or error transform.
    pub json: &'a Value,

    /// The `before` payload, or `None` when no `before` hook was registered.
    pub before: Option<B>,
}

impl<'a, B> AfterContext<'a, B> {
    fn erase_payload(self) -> AfterContext<'a, ()> {
        AfterContext {
            response: self.response,
            json:     self.json,
            before:   self.before.map(|_| ()),
        }
    }
}

/// Optional hooks for one call.
///
/// Type parameters:
/// - `T`: `data` of a success outcome, produced by `on_success`
/// - `E`: `data` of an error outcome, produced by `on_error`
/// - `B`: payload returned by `before` and handed to `after`
/// - `A`: payload returned by `after`, reported as `after_data`
///
/// `on_success` and `on_error` default to identity over the decoded body.
/// `before` and `after` default to absent, which yields `None` payloads.
///
/// Registering `after`, `on_success` or `on_error` replaces the previous hook
/// for that stage. `before` fixes the payload type, so it can only be
/// registered while the payload type is still `()`; registering it then
/// replaces any payload-less `before` hook. Register `before` ahead of an
/// `after` hook that reads the payload.
///
/// # Examples
///
/// ```
/// use callfetch::Callbacks;
///
/// let callbacks = Callbacks::new()
///     .before(|options| {
///         options.headers.push(("x-request-id".into(), "42".into()));
///         "42"
///     })
///     .after(|ctx| (ctx.response.status(), ctx.before))
///     .on_error(|response, body| format!("{}: {body}", response.status()));
/// # let _ = callbacks;
/// ```
pub struct Callbacks<T = Value, E = Value, B = (), A = ()> {
    pub(crate) before:     Option<BeforeHook<B>>,
    pub(crate) after:      Option<AfterHook<B, A>>,
    pub(crate) on_success: BodyHook<T>,
    pub(crate) on_error:   BodyHook<E>,
}

impl Callbacks {
    /// No `before`/`after` hooks, identity body transforms.
    pub fn new() -> Self {
        Self {
            before:     None,
            after:      None,
            on_success: identity(),
            on_error:   identity(),
        }
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::new()
    }
}

fn identity() -> BodyHook<Value> {
    Box::new(|_, json| Ok(json))
}

fn after_hook<B, A, F>(hook: F) -> AfterHook<B, A>
where
    F: FnOnce(AfterContext<'_, B>) -> Result<A, HookError> + Send + 'static,
{
    Box::new(hook)
}

impl<T, E, A: 'static> Callbacks<T, E, (), A> {
    pub fn before<B, F>(self, hook: F) -> Callbacks<T, E, B, A>
    where
        B: 'static,
        F: FnOnce(&mut RequestOptions) -> B + Send + 'static,
    {
        self.try_before(move |options| Ok(hook(options)))
    }

    pub fn try_before<B, F>(self, hook: F) -> Callbacks<T, E, B, A>
    where
        B: 'static,
        F: FnOnce(&mut RequestOptions) -> Result<B, HookError> + Send + 'static,
    {
        // An `after` hook registered earlier only knows whether a payload exists.
        let after: Option<AfterHook<B, A>> = self
            .after
            .map(|after| after_hook(move |ctx| after(ctx.erase_payload())));

        Callbacks {
            before: Some(Box::new(hook)),
            after,
            on_success: self.on_success,
            on_error: self.on_error,
        }
    }
}

impl<T, E, B, A> Callbacks<T, E, B, A> {
    pub fn after<A2, F>(self, hook: F) -> Callbacks<T, E, B, A2>
    where
        F: FnOnce(AfterContext<'_, B>) -> A2 + Send + 'static,
    {
        self.try_after(move |ctx| Ok(hook(ctx)))
    }

    pub fn try_after<A2, F>(self, hook: F) -> Callbacks<T, E, B, A2>
    where
        F: FnOnce(AfterContext<'_, B>) -> Result<A2, HookError> + Send + 'static,
    {
        Callbacks {
            before:     self.before,
            after:      Some(Box::new(hook)),
            on_success: self.on_success,
            on_error:   self.on_error,
        }
    }

    pub fn on_success<T2, F>(self, hook: F) -> Callbacks<T2, E, B, A>
    where
        F: FnOnce(&Response, Value) -> T2 + Send + 'static,
    {
        self.try_on_success(move |response, json| Ok(hook(response, json)))
    }

    pub fn try_on_success<T2, F>(self, hook: F) -> Callbacks<T2, E, B, A>
    where
        F: FnOnce(&Response, Value) -> Result<T2, HookError> + Send + 'static,
    {
        Callbacks {
            before:     self.before,
            after:      self.after,
            on_success: Box::new(hook),
            on_error:   self.on_error,
        }
    }

    pub fn on_error<E2, F>(self, hook: F) -> Callbacks<T, E2, B, A>
    where
        F: FnOnce(&Response, Value) -> E2 + Send + 'static,
    {
        self.try_on_error(move |response, json| Ok(hook(response, json)))
    }

    pub fn try_on_error<E2, F>(self, hook: F) -> Callbacks<T, E2, B, A>
    where
        F: FnOnce(&Response, Value) -> Result<E2, HookError> + Send + 'static,
    {
        Callbacks {
            before:     self.before,
            after:      self.after,
            on_success: self.on_success,
            on_error:   Box::new(hook),
        }
    }

    pub fn has_before(&self) -> bool {
        self.before.is_some()
    }

    pub fn has_after(&self) -> bool {
        self.after.is_some()
    }
}

impl<B, A> Callbacks<Value, Value, B, A> {
    /// Replace both body transforms with serde deserialization.
    ///
    /// A body that does not match the target type fails the lifecycle in the
    /// `on_success` or `on_error` stage.
    pub fn deserialize_into<T, E>(self) -> Callbacks<T, E, B, A>
    where
        T: DeserializeOwned + 'static,
        E: DeserializeOwned + 'static,
    {
        self.try_on_success(|_, json| serde_json::from_value(json).map_err(Into::into))
            .try_on_error(|_, json| serde_json::from_value(json).map_err(Into::into))
    }
}

impl<T, E, B, A> fmt::Debug for Callbacks<T, E, B, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("before", &self.before.as_ref().map(|_| "{ ... }"))
            .field("after", &self.after.as_ref().map(|_| "{ ... }"))
            .field("on_success", &"{ ... }")
            .field("on_error", &"{ ... }")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16) -> Response {
        Response::new("http://localhost/todos/1", status, "{}")
    }

    #[test]
    fn new_has_identity_body_hooks() {
        let callbacks = Callbacks::new();
        assert!(!callbacks.has_before());
        assert!(!callbacks.has_after());

        let body = json!({ "id": 1 });
        let data = (callbacks.on_success)(&response(200), body.clone()).unwrap();
        assert_eq!(data, body);
    }

    #[test]
    fn before_mutates_options_and_returns_payload() {
        let callbacks = Callbacks::new().before(|options| {
            options.headers.push(("x-id".into(), "7".into()));
            7_u8
        });

        let mut options = RequestOptions::default();
        let payload = (callbacks.before.unwrap())(&mut options).unwrap();
        assert_eq!(payload, 7);
        assert_eq!(options.header_value("x-id"), Some("7"));
    }

    #[test]
    fn payload_before_replaces_payloadless_before() {
        let callbacks = Callbacks::new()
            .before(|options| options.headers.push(("x-first".into(), "1".into())))
            .before(|_| 5_u8);

        let mut options = RequestOptions::default();
        let payload = (callbacks.before.unwrap())(&mut options).unwrap();
        assert_eq!(payload, 5);
        assert_eq!(options.header_value("x-first"), None);
    }

    #[test]
    fn earlier_after_hook_survives_before_registration() {
        let callbacks = Callbacks::new()
            .after(|ctx| ctx.before.is_some())
            .before(|_| "payload");

        let response = response(200);
        let json = json!(null);
        let seen = (callbacks.after.unwrap())(AfterContext {
            response: &response,
            json:     &json,
            before:   Some("payload"),
        })
        .unwrap();
        assert!(seen);
    }

    #[test]
    fn deserialize_into_reports_shape_mismatch() {
        #[derive(Debug, serde::Deserialize)]
        struct Todo {
            #[allow(dead_code)]
            id: u32,
        }

        let callbacks = Callbacks::new().deserialize_into::<Todo, Value>();
        let error = (callbacks.on_success)(&response(200), json!({ "id": "one" })).unwrap_err();
        assert!(error.to_string().contains("invalid type"));
    }

    #[test]
    fn debug_lists_registered_hooks() {
        let callbacks = Callbacks::new().after(|_| ());
        let debug = format!("{callbacks:?}");
        assert!(debug.contains("before: None"));
        assert!(debug.contains("after: Some"));
    }
}
