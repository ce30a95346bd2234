//! HTTP client for the Google Places web service.
//!
//! Wraps `reqwest` with API key handling, URL construction and a single
//! request helper that turns non-2xx responses into typed errors. The
//! endpoint-specific logic lives in [`crate::search`] and [`crate::details`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;

/// Client for the Places Text Search and Place Details endpoints.
///
/// The base URL is injected so tests can point the client at a mock server.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl PlacesClient {
    /// Creates a client with a custom user agent and base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join("textsearch/json")` appends
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Builds `{base}{endpoint}?{extra...}&key=...` with percent-encoded
    /// query parameters.
    pub(crate) fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(endpoint)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, requires a 2xx status, and parses the body as JSON.
    ///
    /// `endpoint` is used for error context in place of the full URL, which
    /// carries the API key. Transport errors are stripped of their URL for
    /// the same reason.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not valid JSON.
    pub(crate) async fn request_json(
        &self,
        endpoint: &str,
        url: &Url,
    ) -> Result<serde_json::Value, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_owned(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }
}
