//! Retry with exponential backoff
//!
//! Transient upstream failures are retried with exponentially growing,
//! jittered delays. Jitter spreads out concurrent retries so a throttled
//! fleet does not hammer the service in lockstep.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retry attempts after the initial try
    pub max_retries: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Cap on the exponentially growing delay
    pub max_delay: Duration,

    /// Backoff multiplier applied per attempt
    pub multiplier: f64,

    /// Add random jitter to each delay
    pub use_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            use_jitter: true,
        }
    }
}

impl RetryConfig {
    /// Preset for Bedrock API calls: longer initial delay and a higher
    /// cap, sized for model throttling windows.
    pub fn bedrock() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            use_jitter: true,
        }
    }

    /// Set maximum retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set initial delay
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Disable jitter (deterministic delays, mainly for tests)
    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base_ms =
            self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        let capped_ms = base_ms.min(self.max_delay.as_millis() as f64);

        let delay_ms = if self.use_jitter {
            capped_ms + rand::thread_rng().gen_range(0.0..capped_ms)
        } else {
            capped_ms
        };

        Duration::from_millis(delay_ms as u64)
    }
}

/// Execute an async operation, retrying while `is_retryable` approves the
/// error and the retry budget lasts. Returns the first success or the
/// last error.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    config: &RetryConfig,
    is_retryable: R,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= config.max_retries || !is_retryable(&err) {
                    return Err(err);
                }

                let delay = config.delay_for(attempt);
                attempt += 1;

                tracing::debug!(
                    attempt = attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying after transient failure"
                );

                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_growth_and_cap() {
        let config = RetryConfig {
            max_retries: 5,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(400),
            multiplier: 2.0,
            use_jitter: false,
        };

        assert_eq!(config.delay_for(0), Duration::from_millis(100));
        assert_eq!(config.delay_for(1), Duration::from_millis(200));
        assert_eq!(config.delay_for(2), Duration::from_millis(400));
        // Capped from here on
        assert_eq!(config.delay_for(3), Duration::from_millis(400));
    }

    #[test]
    fn test_jitter_bounds() {
        let config = RetryConfig::bedrock();
        for attempt in 0..4 {
            let base = config.clone().without_jitter().delay_for(attempt);
            let jittered = config.delay_for(attempt);
            assert!(jittered >= base);
            assert!(jittered < base * 2);
        }
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failures() {
        let config = RetryConfig::default()
            .with_initial_delay(Duration::from_millis(1))
            .without_jitter();
        let calls = AtomicU32::new(0);

        let result: Result<u32, &str> = retry_with_backoff(
            &config,
            |_| true,
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err("transient")
                } else {
                    Ok(n)
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_fast() {
        let config = RetryConfig::default()
            .with_initial_delay(Duration::from_millis(1))
            .without_jitter();
        let calls = AtomicU32::new(0);

        let result: Result<u32, &str> = retry_with_backoff(
            &config,
            |_| false,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("fatal")
            },
        )
        .await;

        assert_eq!(result.unwrap_err(), "fatal");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_budget_exhaustion() {
        let config = RetryConfig::default()
            .with_max_retries(2)
            .with_initial_delay(Duration::from_millis(1))
            .without_jitter();
        let calls = AtomicU32::new(0);

        let result: Result<u32, &str> = retry_with_backoff(
            &config,
            |_| true,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("transient")
            },
        )
        .await;

        assert!(result.is_err());
        // Initial attempt plus two retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
