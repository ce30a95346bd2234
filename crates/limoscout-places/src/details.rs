//! Place Details lookups with per-status back-off.

use std::time::Duration;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::retry::{retry_bounded, Step};
use crate::types::{ApiStatus, DetailsResponse, PlaceDetails};

const ENDPOINT: &str = "details/json";

/// Fields requested from `details/json`. Billing is per field group, so this
/// list is kept to what the output needs.
pub const DETAIL_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,\
international_phone_number,website,url,types,rating,user_ratings_total,\
geometry/location,opening_hours";

/// Back-off schedule for Place Details.
///
/// Delays scale linearly with the 1-based attempt number `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailsPolicy {
    /// `base` in `base × n`; also the pause between successive lookups.
    pub base_delay: Duration,
    /// Minimum wait after a quota status.
    pub quota_floor: Duration,
    pub max_attempts: u32,
}

impl Default for DetailsPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(120),
            quota_floor: Duration::from_secs(1),
            max_attempts: 3,
        }
    }
}

impl DetailsPolicy {
    /// Wait after a network failure or non-2xx response.
    #[must_use]
    pub fn transport_delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Wait before retrying after `status`, or `None` when the status is
    /// terminal for this place.
    #[must_use]
    pub fn status_delay(&self, status: &ApiStatus, attempt: u32) -> Option<Duration> {
        match status {
            ApiStatus::OverQueryLimit | ApiStatus::ResourceExhausted => Some(
                self.base_delay
                    .saturating_mul(attempt.saturating_mul(5))
                    .max(self.quota_floor),
            ),
            ApiStatus::InvalidRequest | ApiStatus::UnknownError => {
                Some(self.base_delay.saturating_mul(attempt))
            }
            _ => None,
        }
    }
}

impl PlacesClient {
    /// Fetches details for `place_id`.
    ///
    /// An `OK` payload without a `result` object yields an empty
    /// [`PlaceDetails`].
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] for a terminal status such as `NOT_FOUND`.
    /// - [`PlacesError::Deserialize`] if the body does not match the envelope.
    /// - [`PlacesError::RetriesExhausted`] once the attempt budget is spent.
    pub async fn try_fetch_details(
        &self,
        place_id: &str,
        policy: &DetailsPolicy,
    ) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(ENDPOINT, &[("place_id", place_id), ("fields", DETAIL_FIELDS)]);
        let context = format!("details(place_id={place_id})");

        retry_bounded(policy.max_attempts, &context, |attempt| {
            let url = url.clone();
            let context = context.clone();
            async move {
                let body = match self.request_json(ENDPOINT, &url).await {
                    Ok(body) => body,
                    Err(err) if err.is_transport() => {
                        return Step::Retry {
                            delay: policy.transport_delay(attempt),
                            reason: err.to_string(),
                        };
                    }
                    Err(err) => return Step::Abandon(err),
                };
                let response: DetailsResponse = match serde_json::from_value(body) {
                    Ok(response) => response,
                    Err(source) => {
                        return Step::Abandon(PlacesError::Deserialize { context, source });
                    }
                };

                if response.status == ApiStatus::Ok {
                    return Step::Done(response.result.unwrap_or_default());
                }
                match policy.status_delay(&response.status, attempt) {
                    Some(delay) => Step::Retry {
                        delay,
                        reason: response.status.to_string(),
                    },
                    None => Step::Abandon(PlacesError::ApiStatus {
                        status: response.status,
                        context,
                        message: response.error_message,
                    }),
                }
            }
        })
        .await
    }

    /// Best-effort variant of [`try_fetch_details`](Self::try_fetch_details).
    ///
    /// Returns `None` on any failure or when the payload carried no usable
    /// fields. Failures are logged, never propagated.
    pub async fn fetch_details(
        &self,
        place_id: &str,
        policy: &DetailsPolicy,
    ) -> Option<PlaceDetails> {
        match self.try_fetch_details(place_id, policy).await {
            Ok(details) if details.is_empty() => {
                tracing::debug!(place_id, "details payload was empty");
                None
            }
            Ok(details) => Some(details),
            Err(PlacesError::ApiStatus {
                status, message, ..
            }) => {
                tracing::warn!(
                    place_id,
                    status = %status,
                    message = message.as_deref().unwrap_or(""),
                    "details lookup returned terminal status"
                );
                None
            }
            Err(err) => {
                tracing::warn!(place_id, error = %err, "details lookup failed");
                None
            }
        }
    }
}
