use bytes::Bytes;
use serde::de::DeserializeOwned;

/// A fully received transport response.
///
/// The body is held in memory, so it can be decoded any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    url:     String,
    status:  u16,
    headers: Vec<(String, String)>,
    body:    Bytes,
}

impl Response {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub(crate) fn from_parts(
        url: String,
        status: u16,
        headers: Vec<(String, String)>,
        body: Bytes,
    ) -> Self {
        Self {
            url,
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// `true` for any status in `200..=299`.
    pub fn ok(&self) -> bool {
        crate::core::is_success(self.status)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn ok_follows_status_range() {
        assert!(Response::new("u", 200, "{}").ok());
        assert!(Response::new("u", 204, "").ok());
        assert!(!Response::new("u", 404, "{}").ok());
        assert!(!Response::new("u", 301, "{}").ok());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = Response::new("u", 200, "{}").with_header("Content-Type", "application/json");
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("etag"), None);
    }

    #[test]
    fn json_decodes_body() {
        let response = Response::new("u", 200, r#"{"message":"not found"}"#);
        let value: Value = response.json().unwrap();
        assert_eq!(value, json!({ "message": "not found" }));
    }

    #[test]
    fn json_rejects_plain_text() {
        let response = Response::new("u", 502, "Bad Gateway");
        assert!(response.json::<Value>().is_err());
        assert_eq!(response.text().unwrap(), "Bad Gateway");
    }
}
