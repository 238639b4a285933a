use callfetch_safe::{Safe, safe};
use serde_json::Value;

use super::http::HttpClient;
use crate::core;
use crate::data::{AfterContext, Callbacks, FetchOutcome, RequestOptions, Stage};
use crate::error::{Error, Result};

/// Runs request lifecycles over an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run one lifecycle against `url`, starting from default request options.
    ///
    /// See [`fetch_with_options`](Self::fetch_with_options).
    pub async fn fetch_with_callbacks<T, E, B, A>(
        &self,
        url: &str,
        callbacks: Callbacks<T, E, B, A>,
    ) -> Safe<FetchOutcome<T, E, A>, Error> {
        self.fetch_with_options(url, callbacks, RequestOptions::default())
            .await
    }

    /// Run one lifecycle against `url`.
    ///
    /// The stages run strictly in order: `before` (with `&mut options`), one
    /// request plus JSON decode, `after`, then `on_success` or `on_error`.
    /// Nothing escapes as a panic: transport and decode errors, failing hooks
    /// and panicking hooks all come back as `Err(Failure)`, while an HTTP
    /// error status comes back as `Ok(FetchOutcome::Error)`.
    pub async fn fetch_with_options<T, E, B, A>(
        &self,
        url: &str,
        callbacks: Callbacks<T, E, B, A>,
        options: RequestOptions,
    ) -> Safe<FetchOutcome<T, E, A>, Error> {
        let result = safe(|| self.run(url, callbacks, options)).await;

        match &result {
            Ok(outcome) => tracing::debug!(
                url,
                status = outcome.response().status(),
                success = outcome.is_success(),
                "lifecycle completed"
            ),
            Err(failure) => tracing::warn!(url, error = %failure, "lifecycle failed"),
        }

        result
    }

    async fn run<T, E, B, A>(
        &self,
        url: &str,
        callbacks: Callbacks<T, E, B, A>,
        mut options: RequestOptions,
    ) -> Result<FetchOutcome<T, E, A>> {
        let Callbacks {
            before,
            after,
            on_success,
            on_error,
        } = callbacks;

        let before_payload = match before {
            Some(hook) => {
                tracing::debug!(url, stage = %Stage::Before, "running hook");
                Some(hook(&mut options).map_err(Error::hook(Stage::Before))?)
            }
            None => None,
        };

        tracing::debug!(url, method = %options.method, "sending request");
        let response = self
            .client
            .send(url, &options)
            .await
            .map_err(|e| Error::Transport(Box::new(e)))?;

        let json: Value = response.json().map_err(Error::Decode)?;
        tracing::debug!(url, status = response.status(), "response decoded");

        let after_data = match after {
            Some(hook) => {
                tracing::debug!(url, stage = %Stage::After, "running hook");
                let ctx = AfterContext {
                    response: &response,
                    json:     &json,
                    before:   before_payload,
                };
                Some(hook(ctx).map_err(Error::hook(Stage::After))?)
            }
            None => None,
        };

        core::settle(response, json, after_data, on_success, on_error)
    }
}
