// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Retry with exponential backoff for explorer requests.
//!
//! [`RetryPolicy::run`] calls an async operation until it succeeds, fails with
//! a non-transient error, or runs out of attempts. The delay before retry `n`
//! (counting from zero) is:
//!
//! ```text
//! delay = min(base_delay * 2^n, max_delay)
//! ```
//!
//! With the defaults (3 attempts, 500ms base) a request that keeps failing is
//! tried at t=0, t=0.5s and t=1.5s before the last error is returned.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::errors::ScrapeError;

/// Default total number of attempts, including the first one.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default base delay for exponential backoff (500ms).
const DEFAULT_BASE_DELAY_MS: u64 = 500;
/// Default maximum delay between attempts (30 seconds).
const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

/// Errors that can tell whether another attempt may succeed.
pub trait Retryable {
    /// Returns `true` if the failed operation is worth retrying.
    fn is_retryable(&self) -> bool;
}

impl Retryable for ScrapeError {
    fn is_retryable(&self) -> bool {
        self.is_transient()
    }
}

/// Retry policy with exponential backoff.
///
/// # Example
///
/// ```rust
/// use scanproxy::retry::RetryPolicy;
/// use std::time::Duration;
///
/// // 3 attempts, 500ms then 1s between them
/// let policy = RetryPolicy::new();
///
/// // Or with custom configuration
/// let policy = RetryPolicy::builder()
///     .max_attempts(5)
///     .base_delay(Duration::from_millis(200))
///     .max_delay(Duration::from_secs(10))
///     .build();
/// assert_eq!(policy.max_attempts(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Creates a retry policy with default settings.
    ///
    /// Default settings:
    /// - 3 attempts in total
    /// - 500ms base delay
    /// - 30s maximum delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for customizing the policy.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::new()
    }

    /// Creates a policy that makes a single attempt and never retries.
    pub fn never() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Total number of attempts, including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Base delay for exponential backoff
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Upper bound for a single backoff delay
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Calculates the delay before retry number `retry` (starting at 0).
    pub fn backoff(&self, retry: u32) -> Duration {
        let multiplier = 2u64.saturating_pow(retry);
        let delay_ms = self
            .base_delay
            .as_millis()
            .saturating_mul(multiplier as u128);
        let capped_delay_ms = delay_ms.min(self.max_delay.as_millis()) as u64;
        Duration::from_millis(capped_delay_ms)
    }

    /// Runs `operation`, retrying retryable failures with backoff.
    ///
    /// Returns the first success, the first non-retryable error, or the last
    /// error once all attempts are used. A policy with `max_attempts == 0`
    /// still makes one attempt.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        E: Retryable + std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1u32;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt = attempt, "Request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    if !error.is_retryable() {
                        debug!(error = %error, "Non-retryable error, not retrying");
                        return Err(error);
                    }

                    if attempt >= max_attempts {
                        warn!(error = %error, attempts = attempt, "Max attempts exceeded");
                        return Err(error);
                    }

                    let delay = self.backoff(attempt - 1);
                    warn!(
                        error = %error,
                        attempt = attempt,
                        max_attempts = max_attempts,
                        delay_ms = delay.as_millis(),
                        "Retryable error, backing off"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Builder for configuring a [`RetryPolicy`].
#[derive(Clone, Debug, Default)]
pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl RetryPolicyBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total number of attempts, including the first one.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.policy.max_attempts = max_attempts;
        self
    }

    /// Sets the base delay for exponential backoff.
    ///
    /// The delay before retry `n` will be `min(base_delay * 2^n, max_delay)`.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.policy.base_delay = delay;
        self
    }

    /// Sets the maximum delay between attempts.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.policy.max_delay = delay;
        self
    }

    /// Builds the configured [`RetryPolicy`].
    pub fn build(self) -> RetryPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use proptest::prelude::*;
    use reqwest::StatusCode;
    use tokio::time::Instant;

    use super::*;

    fn transient() -> ScrapeError {
        ScrapeError::http_status("https://etherscan.io/address/0x1", StatusCode::SERVICE_UNAVAILABLE)
    }

    #[test]
    fn test_retry_policy_default() {
        let policy = RetryPolicy::new();
        assert_eq!(policy.max_attempts(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(policy.base_delay(), Duration::from_millis(DEFAULT_BASE_DELAY_MS));
        assert_eq!(policy.max_delay(), Duration::from_millis(DEFAULT_MAX_DELAY_MS));
    }

    #[test]
    fn test_retry_policy_builder() {
        let policy = RetryPolicy::builder()
            .max_attempts(5)
            .base_delay(Duration::from_millis(200))
            .max_delay(Duration::from_secs(60))
            .build();

        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.base_delay(), Duration::from_millis(200));
        assert_eq!(policy.max_delay(), Duration::from_secs(60));
    }

    #[test]
    fn test_backoff_doubles_from_half_second() {
        let policy = RetryPolicy::new();
        assert_eq!(policy.backoff(0), Duration::from_millis(500));
        assert_eq!(policy.backoff(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_backoff_capped() {
        let policy = RetryPolicy::builder()
            .base_delay(Duration::from_millis(100))
            .max_delay(Duration::from_millis(500))
            .build();

        // 100ms * 2^3 = 800ms, capped at 500ms
        assert_eq!(policy.backoff(3), Duration::from_millis(500));
        assert_eq!(policy.backoff(10), Duration::from_millis(500));
    }

    #[test]
    fn test_backoff_overflow_protection() {
        let policy = RetryPolicy::builder()
            .base_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(60))
            .build();

        assert_eq!(policy.backoff(50), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_succeeds_after_two_failures() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result = RetryPolicy::new()
            .run(|| async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(transient())
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Slept 500ms then 1s
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1500));
        assert!(elapsed < Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<(), ScrapeError> = RetryPolicy::new()
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient())
            })
            .await;

        assert!(matches!(result, Err(ScrapeError::HttpStatus { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_does_not_retry_permanent_errors() {
        let calls = AtomicU32::new(0);

        let result: Result<(), ScrapeError> = RetryPolicy::new()
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ScrapeError::unsupported_network("solana"))
            })
            .await;

        assert!(matches!(result, Err(ScrapeError::UnsupportedNetwork { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::builder().max_attempts(0).build();

        let result: Result<(), ScrapeError> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    proptest! {
        #[test]
        fn prop_backoff_never_exceeds_max_delay(
            base_ms in 0u64..10_000,
            max_ms in 0u64..120_000,
            retry in 0u32..200,
        ) {
            let policy = RetryPolicy::builder()
                .base_delay(Duration::from_millis(base_ms))
                .max_delay(Duration::from_millis(max_ms))
                .build();
            prop_assert!(policy.backoff(retry) <= Duration::from_millis(max_ms));
        }
    }
}
