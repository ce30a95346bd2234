//! Bounded retry loop shared by the Text Search and Place Details calls.
//!
//! Unlike a plain error-driven back-off, the Places API signals most
//! transient conditions through the payload `status` field on an HTTP 200
//! response, so each attempt reports a [`Step`] that says whether to stop,
//! give up, or sleep and try the same request again.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

/// Outcome of a single attempt.
pub(crate) enum Step<T> {
    /// The attempt succeeded.
    Done(T),
    /// Retriable failure: sleep `delay`, then re-issue the same request.
    Retry { delay: Duration, reason: String },
    /// Terminal failure for this unit of work; no further attempts.
    Abandon(PlacesError),
}

/// Runs `attempt_fn` up to `max_attempts` times (at least once).
///
/// `attempt_fn` receives the 1-based attempt number so callers can scale
/// their delays. No sleep happens after the final attempt.
///
/// # Errors
///
/// Returns the error carried by [`Step::Abandon`], or
/// [`PlacesError::RetriesExhausted`] once the budget is spent.
pub(crate) async fn retry_bounded<T, F, Fut>(
    max_attempts: u32,
    context: &str,
    mut attempt_fn: F,
) -> Result<T, PlacesError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Step<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut last_reason = String::new();

    for attempt in 1..=max_attempts {
        match attempt_fn(attempt).await {
            Step::Done(value) => return Ok(value),
            Step::Abandon(err) => return Err(err),
            Step::Retry { delay, reason } => {
                if attempt < max_attempts {
                    #[allow(clippy::cast_possible_truncation)]
                    let delay_ms = delay.as_millis() as u64;
                    tracing::warn!(
                        context,
                        attempt,
                        max_attempts,
                        delay_ms,
                        reason = %reason,
                        "Places request failed, retrying after delay"
                    );
                    tokio::time::sleep(delay).await;
                }
                last_reason = reason;
            }
        }
    }

    Err(PlacesError::RetriesExhausted {
        context: context.to_owned(),
        attempts: max_attempts,
        last: last_reason,
    })
}
