use std::future::Future;

use crate::data::{RequestOptions, Response};

/// Asynchronous HTTP transport.
///
/// One call to [`send`](HttpClient::send) is one request/response cycle. The
/// implementation reads the whole body and leaves decoding to the caller.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - [`MockHttpClient`](crate::MockHttpClient): Scripted responses for tests
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send one request described by `options` and wait for the full response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained (DNS failure,
    /// connection reset, aborted request, ...). A response with an error
    /// status is not an error.
    fn send(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::Method;
    use crate::error::TransportError;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use reqwest::{Client, Proxy};

    /// Settings for building a [`ReqwestClient`].
    #[derive(Debug, Clone)]
    pub struct ClientConfig {
        /// `User-Agent` sent with every request.
        ///
        /// Default: `callfetch/<version>`
        pub user_agent: Option<String>,

        /// Proxy for plain `http://` targets.
        pub http_proxy: Option<String>,

        /// Proxy for `https://` targets.
        pub https_proxy: Option<String>,

        /// Headers sent with every request, before per-call headers.
        pub default_headers: Vec<(String, String)>,
    }

    impl Default for ClientConfig {
        fn default() -> Self {
            Self {
                user_agent:      Some(concat!("callfetch/", env!("CARGO_PKG_VERSION")).to_string()),
                http_proxy:      None,
                https_proxy:     None,
                default_headers: Vec::new(),
            }
        }
    }

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> Result<Self, TransportError> {
            Self::with_config(ClientConfig::default())
        }

        pub fn with_config(config: ClientConfig) -> Result<Self, TransportError> {
            let mut builder = Client::builder().default_headers(header_map(&config.default_headers)?);

            if let Some(agent) = config.user_agent {
                builder = builder.user_agent(agent);
            }
            if let Some(url) = config.http_proxy {
                builder = builder.proxy(Proxy::http(url)?);
            }
            if let Some(url) = config.https_proxy {
                builder = builder.proxy(Proxy::https(url)?);
            }

            Ok(Self {
                client: builder.build()?,
            })
        }

        fn request(
            &self,
            url: &str,
            options: &RequestOptions,
        ) -> Result<reqwest::RequestBuilder, TransportError> {
            let mut request = self
                .client
                .request(method(options.method), url)
                .headers(header_map(&options.headers)?);

            if let Some(body) = &options.body {
                request = request.body(body.clone());
            }

            Ok(request)
        }

        async fn exchange(request: reqwest::RequestBuilder) -> Result<Response, TransportError> {
            let response = request.send().await?;

            let url = response.url().to_string();
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let body = response.bytes().await?;

            Ok(Response::from_parts(url, status, headers, body))
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = TransportError;

        async fn send(&self, url: &str, options: &RequestOptions) -> Result<Response, Self::Error> {
            let exchange = Self::exchange(self.request(url, options)?);

            match &options.abort {
                Some(token) => token
                    .run_until_cancelled(exchange)
                    .await
                    .unwrap_or(Err(TransportError::Aborted)),
                None => exchange.await,
            }
        }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::with_capacity(headers.len());

        for (key, value) in headers {
            let invalid = || TransportError::InvalidHeader { name: key.clone() };
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            map.append(name, value);
        }

        Ok(map)
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientConfig, ReqwestClient};
