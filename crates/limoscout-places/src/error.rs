use thiserror::Error;

use crate::types::ApiStatus;

/// Errors returned by the Places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx HTTP status.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload `status` is one we do not retry (e.g. `REQUEST_DENIED`).
    #[error("Places API status {status} for {context}")]
    ApiStatus {
        status: ApiStatus,
        context: String,
        message: Option<String>,
    },

    /// Every attempt in the retry budget ended in a retriable failure.
    #[error("gave up on {context} after {attempts} attempts (last: {last})")]
    RetriesExhausted {
        context: String,
        attempts: u32,
        last: String,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl PlacesError {
    /// Transport-level failures: the request never produced a 2xx response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UnexpectedStatus { .. })
    }
}
