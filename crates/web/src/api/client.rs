//! Request plumbing shared by every backend operation.

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{ApiError, ErrorBody, FALLBACK_MESSAGE};
use crate::config::ApiConfig;

/// Task backend API client.
///
/// Cheap to clone; all clones share one connection pool. The bearer token is
/// passed per call since it belongs to the browser session, not the process.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new backend API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client: builder.build()?,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Build the URL for an endpoint from path segments.
    ///
    /// Segments are percent-encoded individually, so IDs and statuses such as
    /// `In Progress` cannot break out of their position.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(format!("{} cannot be a base", self.inner.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&SecretString>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        let builder = self.inner.client.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: Option<&SecretString>,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, segments, token)?;
        Self::execute(request).await
    }

    /// Execute a request with a JSON body (POST, PUT, PATCH).
    pub(crate) async fn send_json<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&SecretString>,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.request(method, segments, token)?.json(body);
        Self::execute(request).await
    }

    /// Execute a DELETE request, ignoring the response body.
    pub(crate) async fn delete(
        &self,
        segments: &[&str],
        token: Option<&SecretString>,
    ) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, segments, token)?;
        let _: serde::de::IgnoredAny = Self::execute(request).await?;
        Ok(())
    }

    /// Send a request and decode the response.
    ///
    /// Non-success statuses become [`ApiError::Api`] carrying the body's
    /// `message`, or [`FALLBACK_MESSAGE`] when there is none.
    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

            tracing::debug!(status = status.as_u16(), %message, "Backend rejected request");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // 204 and other empty bodies decode as JSON null
        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(body)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::parse_api_url;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: parse_api_url(base).unwrap(),
            timeout: None,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let url = client("https://backend.example.com/api")
            .endpoint(&["tasks", "t1", "status"])
            .unwrap();
        assert_eq!(url.as_str(), "https://backend.example.com/api/tasks/t1/status");
    }

    #[test]
    fn test_endpoint_on_root_base() {
        let url = client("http://localhost:5000").endpoint(&["users"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/users");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = client("http://localhost:5000/api")
            .endpoint(&["tasks", "status", "In Progress"])
            .unwrap();
        assert_eq!(url.path(), "/api/tasks/status/In%20Progress");

        let url = client("http://localhost:5000/api")
            .endpoint(&["tasks", "../users"])
            .unwrap();
        assert_eq!(url.path(), "/api/tasks/..%2Fusers");
    }

    #[test]
    fn test_debug_shows_base_url() {
        let debug_output = format!("{:?}", client("http://localhost:5000/api"));
        assert!(debug_output.contains("http://localhost:5000/api"));
    }
}
