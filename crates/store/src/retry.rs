//! Explicit retry-with-backoff for transient store failures.
//!
//! Replaces declarative retry annotations with a visible wrapper: the
//! orchestrator decides which calls are wrapped, and only
//! transient-classified errors are ever retried. Validation and state
//! errors never reach this layer.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::{Result, StoreError};

/// Retry parameters: attempts, base delay, and backoff multiplier.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub multiplier: f64,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            multiplier: 2.0,
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Runs `operation`, retrying transient failures with exponential
/// backoff according to `policy`.
///
/// Non-transient errors are returned immediately; a transient error is
/// returned once `max_attempts` is exhausted.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    let mut delay = policy.base_delay;

    loop {
        attempt += 1;

        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempt, "store operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) if error.is_transient() && attempt < policy.max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %error,
                    delay_ms = delay.as_millis(),
                    "transient store failure, retrying after delay"
                );
                sleep(delay).await;
                delay = Duration::from_millis(
                    ((delay.as_millis() as f64) * policy.multiplier) as u64,
                )
                .min(policy.max_delay);
            }
            Err(error) => return Err(error),
        }
    }
}
