//! HTTP request helper shared by every backend call

use reqwest::{Client, RequestBuilder, Method, header::{HeaderMap, HeaderValue}};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::NetworkError;

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Append a query parameter
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Abort the request after the given duration
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, NetworkError> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// The URL the request will be sent to, query included
    pub fn url(&self) -> Result<Url, NetworkError> {
        let mut url = Url::parse(&self.url)?;
        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn build(&self) -> Result<RequestBuilder, NetworkError> {
        let url = self.url()?;
        debug!("{} {}", self.method, url);

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, NetworkError> {
        let req = self.build()?;
        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(NetworkError::status(status, server_detail(&text)));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            // 204 and friends: let callers that accept `Value` see null
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Extract a human readable message from an error response body.
///
/// The backend answers with `{"error": ...}`, `{"message": ...}` or a
/// `{"detail": ...}` body depending on which layer rejected the request.
fn server_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_detail_prefers_error_field() {
        let body = r#"{"error": "Failed to send email", "message": "ignored"}"#;
        assert_eq!(server_detail(body).as_deref(), Some("Failed to send email"));
    }

    #[test]
    fn test_server_detail_ignores_non_json_and_blank() {
        assert_eq!(server_detail("Internal Server Error"), None);
        assert_eq!(server_detail(r#"{"message": "   "}"#), None);
        assert_eq!(server_detail(r#"{"email": ["Enter a valid email address."]}"#), None);
    }

    #[test]
    fn test_query_params_are_appended() {
        let client = Client::new();
        let url = FetchBuilder::new(&client, "http://localhost:3000/api/projects", Method::GET)
            .query("limit", "6")
            .url()
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/projects?limit=6");
    }
}
