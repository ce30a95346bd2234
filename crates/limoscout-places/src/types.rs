//! Google Places web service response types.
//!
//! Both endpoints wrap their payload in a `{"status": "...", ...}` envelope.
//! The `status` string is modelled by [`ApiStatus`]; unrecognised values are
//! kept verbatim in [`ApiStatus::Other`].

use serde::Deserialize;

/// Value of the `status` field in a Places response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    OverQueryLimit,
    ResourceExhausted,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    NotFound,
    Other(String),
}

impl Default for ApiStatus {
    /// A payload without a `status` field is treated as an unknown status.
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ApiStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "RESOURCE_EXHAUSTED" => Self::ResourceExhausted,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "UNKNOWN_ERROR" => Self::UnknownError,
            "NOT_FOUND" => Self::NotFound,
            _ => Self::Other(raw),
        }
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Other(raw) if raw.is_empty() => "<missing>",
            Self::Other(raw) => raw,
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Text Search
// ---------------------------------------------------------------------------

/// One page of `textsearch/json` results.
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    #[serde(default)]
    pub status: ApiStatus,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A single Text Search hit. Only the identifier is kept; everything else
/// is fetched again through Place Details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub place_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Place Details
// ---------------------------------------------------------------------------

/// Envelope for `details/json`.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub status: ApiStatus,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// The requested subset of Place Details fields.
///
/// `types`, `rating`, `user_ratings_total`, `geometry` and `opening_hours`
/// are kept as raw JSON so a malformed value degrades to an empty column
/// instead of failing the record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Canonical Google Maps URL for the place.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub types: Option<serde_json::Value>,
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub user_ratings_total: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
    #[serde(default)]
    pub opening_hours: Option<serde_json::Value>,
}

impl PlaceDetails {
    /// `true` when the payload carried none of the requested fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
