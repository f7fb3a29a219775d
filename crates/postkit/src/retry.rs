//! Retry logic with exponential backoff for transient errors.
//!
//! [`Client`](crate::Client) never retries on its own. Callers that want
//! retries wrap read-only calls with [`with_retry`]. Update and delete are
//! not safe to replay blindly and should not be wrapped.

use crate::error::{Error, Result};
use std::thread;
use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_factor: f64,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            backoff_factor: 2.0,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with custom settings.
    pub fn new(max_attempts: u32, base_delay: Duration, backoff_factor: f64) -> Self {
        Self {
            max_attempts,
            base_delay,
            backoff_factor,
            ..Default::default()
        }
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.base_delay.as_secs_f64() * self.backoff_factor.powi(attempt as i32);
        let capped = delay.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Create a config that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }
}

/// Callback trait for retry progress notifications.
pub trait RetryCallback {
    /// Called before sleeping ahead of the next attempt.
    ///
    /// # Arguments
    /// * `attempt` - Attempt that just failed (1-indexed)
    /// * `max_attempts` - Maximum number of attempts
    /// * `error` - The error that triggered the retry
    /// * `delay` - Time until the next attempt
    fn on_retry(&self, attempt: u32, max_attempts: u32, error: &Error, delay: Duration);
}

/// Callback that logs retries at `warn` level.
pub struct LogCallback;

impl RetryCallback for LogCallback {
    fn on_retry(&self, attempt: u32, max_attempts: u32, error: &Error, delay: Duration) {
        log::warn!(
            "Attempt {}/{} failed: {}. Retrying in {:.1}s...",
            attempt,
            max_attempts,
            error,
            delay.as_secs_f64()
        );
    }
}

/// Execute an operation with retry logic.
///
/// Retries the operation while it returns a retryable error, using
/// exponential backoff between attempts. Non-retryable errors (not found,
/// 4xx, decode failures) are returned immediately.
pub fn with_retry<T, F>(
    config: &RetryConfig,
    callback: Option<&dyn RetryCallback>,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut last_error: Option<Error> = None;

    for attempt in 0..config.max_attempts.max(1) {
        match operation() {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_retryable() {
                    return Err(e);
                }

                if attempt + 1 >= config.max_attempts {
                    last_error = Some(e);
                    break;
                }

                let delay = config.delay_for_attempt(attempt);
                if let Some(cb) = callback {
                    cb.on_retry(attempt + 1, config.max_attempts, &e, delay);
                }

                thread::sleep(delay);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::Other("retry exhausted".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast(max_attempts: u32) -> RetryConfig {
        RetryConfig::new(max_attempts, Duration::from_millis(1), 1.0)
    }

    #[test]
    fn test_delay_for_attempt() {
        let config = RetryConfig::new(5, Duration::from_secs(1), 2.0);
        assert_eq!(config.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(4));
        // capped at max_delay
        assert_eq!(config.delay_for_attempt(10), Duration::from_secs(10));
    }

    #[test]
    fn test_with_retry_success_first_try() {
        let result = with_retry(&RetryConfig::no_retry(), None, || Ok::<_, Error>(42));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_with_retry_non_retryable_error() {
        let attempts = Cell::new(0);
        let result: Result<()> = with_retry(&fast(5), None, || {
            attempts.set(attempts.get() + 1);
            Err(Error::post_not_found(1))
        });
        assert!(result.unwrap_err().is_not_found());
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn test_with_retry_recovers() {
        let attempts = Cell::new(0);
        let result = with_retry(&fast(3), None, || {
            attempts.set(attempts.get() + 1);
            if attempts.get() < 3 {
                Err(Error::http("HTTP 503", Some(503)))
            } else {
                Ok("ok")
            }
        });
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(attempts.get(), 3);
    }

    #[test]
    fn test_with_retry_exhausted() {
        let attempts = Cell::new(0);
        let result: Result<()> = with_retry(&fast(2), None, || {
            attempts.set(attempts.get() + 1);
            Err(Error::http("connection reset", None))
        });
        assert_eq!(result.unwrap_err().status(), None);
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn test_with_retry_zero_attempts_runs_once() {
        let attempts = Cell::new(0);
        let result = with_retry(&fast(0), None, || {
            attempts.set(attempts.get() + 1);
            Ok::<_, Error>(())
        });
        assert!(result.is_ok());
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn test_with_retry_callback() {
        struct Counting(Cell<u32>);
        impl RetryCallback for Counting {
            fn on_retry(&self, _: u32, _: u32, _: &Error, _: Duration) {
                self.0.set(self.0.get() + 1);
            }
        }

        let callback = Counting(Cell::new(0));
        let _: Result<()> = with_retry(&fast(3), Some(&callback), || {
            Err(Error::http("HTTP 502", Some(502)))
        });
        assert_eq!(callback.0.get(), 2);
    }
}
