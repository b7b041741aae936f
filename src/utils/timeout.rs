//! Timeout helper for upstream calls

use std::time::Duration;

/// Apply a deadline to an async operation.
///
/// The inner error type is preserved so callers can still classify it.
pub async fn with_timeout<T, E>(
    deadline: Duration,
    future: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, TimeoutError<E>> {
    match tokio::time::timeout(deadline, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(TimeoutError::Inner(err)),
        Err(_) => Err(TimeoutError::Timeout(deadline)),
    }
}

/// Error type for deadline-wrapped operations
#[derive(Debug, thiserror::Error)]
pub enum TimeoutError<E> {
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Inner(E),
}

impl<E> TimeoutError<E> {
    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, TimeoutError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result: Result<i32, TimeoutError<String>> =
            with_timeout(Duration::from_secs(1), async { Ok::<_, String>(42) }).await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_inner_error_is_preserved() {
        let result: Result<i32, TimeoutError<String>> =
            with_timeout(Duration::from_secs(1), async {
                Err::<i32, _>("upstream failed".to_string())
            })
            .await;

        let err = result.unwrap_err();
        assert!(!err.is_timeout());
        assert!(matches!(err, TimeoutError::Inner(ref msg) if msg == "upstream failed"));
    }

    #[tokio::test]
    async fn test_deadline_expiry() {
        let result: Result<i32, TimeoutError<String>> =
            with_timeout(Duration::from_millis(10), async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, String>(42)
            })
            .await;

        assert!(result.unwrap_err().is_timeout());
    }
}
