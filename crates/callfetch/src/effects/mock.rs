use std::sync::{Mutex, PoisonError};

use bytes::Bytes;
use serde_json::Value;

use super::http::HttpClient;
use crate::data::{RequestOptions, Response};
use crate::error::TransportError;

/// A request as the transport saw it, after the `before` hook ran.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url:     String,
    pub options: RequestOptions,
}

#[derive(Debug, Clone)]
enum Script {
    Respond {
        status:  u16,
        headers: Vec<(String, String)>,
        body:    Bytes,
    },
    Fail(String),
}

/// Mock HTTP client that answers every request with one scripted response.
///
/// Every request is recorded so tests can inspect what the `before` hook did
/// to the options. A request whose abort token is already cancelled fails with
/// [`TransportError::Aborted`].
#[derive(Debug)]
pub struct MockHttpClient {
    script:   Script,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpClient {
    fn scripted(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Respond `200` with `body` as JSON.
    pub fn success(body: Value) -> Self {
        Self::with_status(200, body)
    }

    /// Respond `404` with `body` as JSON.
    pub fn not_found(body: Value) -> Self {
        Self::with_status(404, body)
    }

    /// Respond with `status` and `body` as JSON.
    pub fn with_status(status: u16, body: Value) -> Self {
        Self::scripted(Script::Respond {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Bytes::from(body.to_string()),
        })
    }

    /// Respond with `status` and an arbitrary body, JSON or not.
    pub fn with_raw_body(status: u16, body: impl Into<Bytes>) -> Self {
        Self::scripted(Script::Respond {
            status,
            headers: Vec::new(),
            body: body.into(),
        })
    }

    /// Fail every request as if the host could not be reached.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::scripted(Script::Fail(message.into()))
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, url: &str, options: &RequestOptions) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                url:     url.to_string(),
                options: options.clone(),
            });
    }
}

impl HttpClient for MockHttpClient {
    type Error = TransportError;

    async fn send(&self, url: &str, options: &RequestOptions) -> Result<Response, Self::Error> {
        self.record(url, options);

        if options.abort.as_ref().is_some_and(|token| token.is_cancelled()) {
            return Err(TransportError::Aborted);
        }

        match &self.script {
            Script::Respond {
                status,
                headers,
                body,
            } => Ok(Response::from_parts(
                url.to_string(),
                *status,
                headers.clone(),
                body.clone(),
            )),
            Script::Fail(message) => Err(TransportError::Unreachable(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn records_requests_in_order() {
        let client = MockHttpClient::success(json!({}));
        client.send("http://a", &RequestOptions::default()).await.unwrap();
        client
            .send("http://b", &RequestOptions::default().header("x", "1"))
            .await
            .unwrap();

        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, "http://a");
        assert_eq!(requests[1].options.header_value("x"), Some("1"));
    }

    #[tokio::test]
    async fn not_found_scripts_404() {
        let client = MockHttpClient::not_found(json!({ "message": "not found" }));
        let response = client.send("http://a", &RequestOptions::default()).await.unwrap();

        assert_eq!(response.status(), 404);
        assert!(!response.ok());
        assert_eq!(response.header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn cancelled_token_aborts() {
        let token = CancellationToken::new();
        token.cancel();

        let client = MockHttpClient::success(json!({}));
        let error = client
            .send("http://a", &RequestOptions::default().abort(token))
            .await
            .unwrap_err();
        assert!(matches!(error, TransportError::Aborted));
    }

    #[tokio::test]
    async fn failing_reports_unreachable() {
        let client = MockHttpClient::failing("connection refused");
        let error = client.send("http://a", &RequestOptions::default()).await.unwrap_err();
        assert_eq!(error.to_string(), "host unreachable: connection refused");
    }
}
