//! Bounded-time execution of fallible futures

use condo_core::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// Run `future` for at most `duration`
///
/// An elapsed deadline becomes `Error::Timeout { operation, .. }`. Dropping
/// the inner future on timeout runs any guards it holds.
pub async fn with_timeout<F, T>(operation: &str, duration: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation = %operation,
                timeout_ms = %duration.as_millis(),
                "remote call timed out"
            );
            Err(Error::timeout(operation, duration))
        }
    }
}

/// Run an infallible future for at most `duration`, returning `None` on expiry
pub async fn with_deadline<F, T>(duration: Duration, future: F) -> Option<T>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(duration, future).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use condo_core::ErrorKind;

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_reported() {
        let result: Result<()> = with_timeout(
            "superAdminOperation",
            Duration::from_secs(5),
            std::future::pending(),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
        assert_eq!(err.kind(), ErrorKind::Generic);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_result_passes_through() {
        let result = with_timeout("op", Duration::from_secs(5), async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);

        let result: Result<()> = with_timeout("op", Duration::from_secs(5), async {
            Err(Error::configuration("boom"))
        })
        .await;
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_returns_none() {
        let value = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            1
        })
        .await;
        assert_eq!(value, None);
    }
}
