use std::fmt;

use bytes::Bytes;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call request configuration.
///
/// The orchestrator owns one value of this type for the duration of a call and
/// lends it mutably to the `before` hook, so a hook can attach headers or an
/// abort signal right before the request goes out.
///
/// # Examples
///
/// ```
/// use callfetch::{Method, RequestOptions};
///
/// let options = RequestOptions::default()
///     .method(Method::Post)
///     .header("Authorization", "Bearer token")
///     .json(&serde_json::json!({ "title": "t" }))
///     .unwrap();
///
/// assert_eq!(options.header_value("content-type"), Some("application/json"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request method.
    ///
    /// Default: GET
    pub method: Method,

    /// Headers sent with the request, in insertion order.
    ///
    /// Default: empty
    pub headers: Vec<(String, String)>,

    /// Raw request body.
    ///
    /// Default: None
    pub body: Option<Bytes>,

    /// Abort signal honored by the transport.
    ///
    /// Cancelling the token makes an in-flight request fail with
    /// [`TransportError::Aborted`](crate::TransportError::Aborted).
    ///
    /// Default: None
    pub abort: Option<CancellationToken>,
}

impl RequestOptions {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Replace all headers.
    #[must_use]
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the request body and mark it as JSON.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .body(body)
            .header("content-type", "application/json"))
    }

    #[must_use]
    pub fn abort(mut self, token: CancellationToken) -> Self {
        self.abort = Some(token);
        self
    }

    /// Last value set for `name`, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_plain_get() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::Get);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
        assert!(options.abort.is_none());
    }

    #[test]
    fn later_header_wins_on_lookup() {
        let options = RequestOptions::default()
            .header("X-Trace", "a")
            .header("x-trace", "b");

        assert_eq!(options.headers.len(), 2);
        assert_eq!(options.header_value("X-TRACE"), Some("b"));
        assert_eq!(options.header_value("missing"), None);
    }

    #[test]
    fn json_body_sets_content_type() {
        let options = RequestOptions::default()
            .json(&serde_json::json!({ "id": 1 }))
            .unwrap();

        assert_eq!(options.body.as_deref(), Some(&b"{\"id\":1}"[..]));
        assert_eq!(options.header_value("Content-Type"), Some("application/json"));
    }

    #[test]
    fn method_display_matches_wire_form() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(Method::default().as_str(), "GET");
    }
}
