//! Bounded retry with exponential backoff.
//!
//! The client retries a POST only when the transport could not obtain a response at all.
//! Whatever the gateway answers, including HTTP error statuses and `resultCode = "Error"`
//! payloads, ends the loop.

use std::time::Duration;

/// Configuration for retry behavior.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use authnet_json::reliability::RetryPolicy;
///
/// // Default policy: 3 attempts, 100ms initial delay, 2s max delay
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
///
/// // Retry immediately, as fast as the transport fails
/// let eager = RetryPolicy { initial_delay: Duration::ZERO, ..RetryPolicy::default() };
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of POST attempts, including the first (default: 3).
    pub max_attempts: u32,
    /// Delay before the first retry (default: 100ms).
    pub initial_delay: Duration,
    /// Upper bound for any single delay (default: 2s).
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (default: 2.0).
    pub backoff_multiplier: f64,
}

/// Number of POST attempts the client makes before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Creates a new retry policy with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy with custom maximum attempts.
    ///
    /// # Examples
    ///
    /// ```
    /// use authnet_json::reliability::RetryPolicy;
    ///
    /// let policy = RetryPolicy::with_max_attempts(5);
    /// assert_eq!(policy.max_attempts, 5);
    /// ```
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts, ..Self::default() }
    }

    /// Calculates the delay after the given (zero-based) failed attempt.
    ///
    /// delay = `initial_delay` * (multiplier ^ attempt), capped at `max_delay`.
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        #[allow(
            clippy::cast_precision_loss,
            reason = "acceptable for duration calculations"
        )]
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(i32::try_from(attempt).unwrap_or(i32::MAX));
        if !delay_ms.is_finite() {
            return self.max_delay;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "delay_ms is positive and finite; saturating cast is intended"
        )]
        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }
}

/// Executes `operation` until it succeeds or the policy runs out of attempts.
///
/// Every error is treated as retryable. A policy with `max_attempts == 0` still makes one
/// attempt.
///
/// # Examples
///
/// ```
/// use std::{
///     sync::atomic::{AtomicU32, Ordering},
///     time::Duration,
/// };
///
/// use authnet_json::reliability::{RetryPolicy, retry_with_backoff};
///
/// # async fn example() -> Result<(), String> {
/// let policy = RetryPolicy { initial_delay: Duration::ZERO, ..RetryPolicy::default() };
/// let attempts = AtomicU32::new(0);
///
/// let result = retry_with_backoff(&policy, || async {
///     if attempts.fetch_add(1, Ordering::Relaxed) == 0 {
///         Err("connection reset".to_owned())
///     } else {
///         Ok("{}")
///     }
/// })
/// .await?;
///
/// assert_eq!(result, "{}");
/// assert_eq!(attempts.load(Ordering::Relaxed), 2);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns the last error if every attempt fails.
pub async fn retry_with_backoff<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(attempt = attempt + 1, "Request succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) => {
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    error = %error,
                    "Request attempt failed"
                );

                if attempt + 1 >= max_attempts {
                    return Err(error);
                }

                let delay = policy.delay_for_attempt(attempt);
                if !delay.is_zero() {
                    tracing::debug!(delay_ms = delay.as_millis(), "Sleeping before retry");
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, reason = "test code compares exact constants")]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn immediate(max_attempts: u32) -> RetryPolicy {
        RetryPolicy { max_attempts, initial_delay: Duration::ZERO, ..RetryPolicy::default() }
    }

    #[test]
    fn test_retry_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay, Duration::from_millis(100));
        assert_eq!(policy.max_delay, Duration::from_secs(2));
        assert!((policy.backoff_multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retry_policy_with_max_attempts() {
        let policy = RetryPolicy::with_max_attempts(5);
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.initial_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_delay_for_attempt() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
    }

    #[test]
    fn test_delay_capped_at_max() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(10), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(u32::MAX), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_retry_success_first_attempt() {
        let call_count = Arc::new(Mutex::new(0));

        let count_clone = Arc::clone(&call_count);
        let result = retry_with_backoff(&immediate(3), || {
            let count = Arc::clone(&count_clone);
            async move {
                *count.lock().unwrap() += 1;
                Ok::<i32, String>(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(*call_count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_retry_success_after_failures() {
        let call_count = Arc::new(Mutex::new(0));

        let count_clone = Arc::clone(&call_count);
        let result = retry_with_backoff(&immediate(3), || {
            let count = Arc::clone(&count_clone);
            async move {
                let mut c = count.lock().unwrap();
                *c += 1;
                let current = *c;
                drop(c);

                if current < 3 { Err("temporary failure".to_owned()) } else { Ok(42) }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(*call_count.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_retry_returns_last_error() {
        let call_count = Arc::new(Mutex::new(0));

        let count_clone = Arc::clone(&call_count);
        let result = retry_with_backoff(&immediate(3), || {
            let count = Arc::clone(&count_clone);
            async move {
                let mut c = count.lock().unwrap();
                *c += 1;
                let current = *c;
                drop(c);
                Err::<i32, String>(format!("failure {current}"))
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), "failure 3");
        assert_eq!(*call_count.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_retry_zero_attempts_still_tries_once() {
        let call_count = Arc::new(Mutex::new(0));

        let count_clone = Arc::clone(&call_count);
        let result = retry_with_backoff(&immediate(0), || {
            let count = Arc::clone(&count_clone);
            async move {
                *count.lock().unwrap() += 1;
                Err::<i32, String>("down".to_owned())
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*call_count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_retry_timing() {
        let policy = RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(10),
            max_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
        };

        let start = std::time::Instant::now();
        let _result =
            retry_with_backoff(&policy, || async { Err::<i32, String>("error".to_owned()) }).await;

        // 10ms + 20ms between the three attempts
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(30), "Expected at least 30ms, got {elapsed:?}");
    }
}
