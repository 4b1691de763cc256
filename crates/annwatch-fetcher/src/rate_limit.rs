//! Retry with exponential back-off and jitter for announcement requests.
//!
//! [`retry_with_backoff`] wraps a fallible async operation and retries on
//! transient errors (429, 5xx, network failures). Everything else is returned
//! immediately so a bad response body never burns through the retry budget.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`FetchError::RateLimited`]: HTTP 429.
/// - [`FetchError::UnexpectedStatus`] with a 5xx status.
/// - [`FetchError::Http`]: connection reset, timeout, TLS failure.
///
/// **Not retriable:**
/// - 4xx statuses other than 429.
/// - [`FetchError::Deserialize`]: the API answered with something that is not
///   the expected JSON (often an HTML block page).
/// - [`FetchError::InvalidUrl`].
pub(crate) fn is_retriable(err: &FetchError) -> bool {
    match err {
        FetchError::RateLimited { .. } | FetchError::Http(_) => true,
        FetchError::UnexpectedStatus { status, .. } => *status >= 500,
        FetchError::Deserialize { .. } | FetchError::InvalidUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_secs = 2`:
///
/// | Retry | Sleep before it             |
/// |-------|-----------------------------|
/// | 1     | 2 s × 2⁰ ± 25 % jitter      |
/// | 2     | 2 s × 2¹ ± 25 % jitter      |
/// | 3     | 2 s × 2² ± 25 % jitter      |
///
/// Delay is capped at 60 s. With `max_retries = 3` the operation runs at most
/// 4 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                let computed = backoff_base_secs
                    .saturating_mul(1_000)
                    .saturating_mul(1u64 << attempt.min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                attempt += 1;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient announcements API error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn server_error() -> FetchError {
        FetchError::UnexpectedStatus {
            status: 503,
            url: "https://api.example.com/ann".to_owned(),
        }
    }

    #[test]
    fn server_errors_are_retriable() {
        assert!(is_retriable(&server_error()));
        assert!(is_retriable(&FetchError::RateLimited {
            retry_after_secs: 5
        }));
    }

    #[test]
    fn client_errors_are_not_retriable() {
        assert!(!is_retriable(&FetchError::UnexpectedStatus {
            status: 403,
            url: "https://api.example.com/ann".to_owned(),
        }));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        let src = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(!is_retriable(&FetchError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, FetchError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_error_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(server_error())
                } else {
                    Ok::<u32, FetchError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn propagates_last_error_after_exhausting_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(FetchError::RateLimited {
                    retry_after_secs: 0,
                })
            }
        })
        .await;
        // max_retries=2 → 3 total attempts
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(FetchError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_forbidden() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(FetchError::UnexpectedStatus {
                    status: 403,
                    url: "https://api.example.com/ann".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(FetchError::UnexpectedStatus { status: 403, .. })
        ));
    }
}
