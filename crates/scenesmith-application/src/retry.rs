//! Bounded fixed-delay retry for idempotent fetches.

use scenesmith_core::{Result, RetryPolicy};
use std::future::Future;

/// Runs `call` until it succeeds, fails with a non-transient error, or the
/// policy's attempts are used up. The last error is returned.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 0;
    loop {
        attempt += 1;
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                tracing::warn!(
                    "[Retry] {} failed (attempt {}/{}), retrying in {:?}: {}",
                    operation,
                    attempt,
                    max_attempts,
                    policy.delay,
                    e
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => {
                if attempt > 1 {
                    tracing::error!(
                        "[Retry] {} failed after {} attempts: {}",
                        operation,
                        attempt,
                        e
                    );
                }
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenesmith_core::ScenesmithError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(2, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = with_retry(&fast_policy(), "list", || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(ScenesmithError::network("connection refused"))
            } else {
                Ok(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = with_retry(&fast_policy(), "list", || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Err(ScenesmithError::http_status(503, format!("down {n}")))
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(result.unwrap_err().to_string().contains("down 2"));
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = with_retry(&fast_policy(), "list", || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ScenesmithError::api("bad request"))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_success_is_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = with_retry(&fast_policy(), "list", || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::<u32>::new())
        })
        .await;
        assert!(result.unwrap().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
