//! Exponential backoff for rate-limited operations.

use super::classify::is_rate_limit_error;
use crate::config::RetryConfig;
use crate::error::{ConfigError, RetryError};
use std::fmt::Display;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Blocking retry policy that only retries rate-limit failures.
///
/// The wait before retry `n` (1-indexed, counting retries rather than
/// attempts) is:
///
/// ```text
/// delay(n) = initial_sleep_time * backoff_factor ^ n
/// ```
///
/// There is no cap and no jitter. With the defaults (20 attempts, 1.0s,
/// 1.5x) the first wait is 1.5s and the last one roughly 2216s.
///
/// # Examples
///
/// ```rust
/// use playground_core::retry::ExponentialBackoff;
///
/// let backoff = ExponentialBackoff::builder()
///     .max_retries(3)
///     .initial_sleep_time(0.01)
///     .build()
///     .unwrap();
///
/// let answer = backoff.execute(|| Ok::<_, std::io::Error>(42)).unwrap();
/// assert_eq!(answer, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff {
    max_retries: u32,
    initial_sleep_time: f64,
    backoff_factor: f64,
}

impl ExponentialBackoff {
    /// Create a new builder for configuring exponential backoff.
    pub fn builder() -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder::default()
    }

    /// Build a policy from a loaded configuration.
    pub fn new(config: RetryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            max_retries: config.max_retries,
            initial_sleep_time: config.initial_sleep_time,
            backoff_factor: config.backoff_factor,
        })
    }

    /// Maximum number of attempts, the first one included.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Starting delay in seconds.
    pub fn initial_sleep_time(&self) -> f64 {
        self.initial_sleep_time
    }

    /// Multiplier applied to the delay before each wait.
    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }

    /// The settings this policy was built from.
    pub fn config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_sleep_time: self.initial_sleep_time,
            backoff_factor: self.backoff_factor,
        }
    }

    /// Delay slept before retry `retry` (1 for the second attempt, 2 for the
    /// third, and so on).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        secs_to_duration(self.initial_sleep_time * self.backoff_factor.powi(exponent))
    }

    /// Run `operation` until it succeeds, fails with something other than a
    /// rate limit, or runs out of attempts. Waits block the current thread.
    pub fn execute<F, T, E>(&self, operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
    {
        self.execute_with_sleep(operation, thread::sleep)
    }

    /// Same as [`execute`](Self::execute) with the wait supplied by the caller.
    ///
    /// `sleep` receives each backoff delay in order. Passing a recorder
    /// instead of `std::thread::sleep` lets a caller drive the loop on a
    /// simulated clock.
    pub fn execute_with_sleep<F, S, T, E>(
        &self,
        mut operation: F,
        mut sleep: S,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, E>,
        S: FnMut(Duration),
        E: Display,
    {
        let mut sleep_time = self.initial_sleep_time;

        for attempt in 1..=self.max_retries {
            match operation() {
                Ok(result) => return Ok(result),
                Err(err) if !is_rate_limit_error(&err.to_string()) => {
                    return Err(RetryError::Operation(err));
                }
                Err(_) if attempt == self.max_retries => break,
                Err(_) => {
                    sleep_time *= self.backoff_factor;
                    let delay = secs_to_duration(sleep_time);
                    debug!(
                        attempt,
                        max_retries = self.max_retries,
                        delay_secs = sleep_time,
                        "rate limited, backing off"
                    );
                    sleep(delay);
                }
            }
        }

        warn!(max_retries = self.max_retries, "rate limited on every attempt, giving up");
        Err(RetryError::MaxRetriesExceeded {
            max_retries: self.max_retries,
        })
    }

    /// Turn an operation into one that retries rate limits with this policy.
    ///
    /// The returned closure takes the same argument (use a tuple for several)
    /// and hands back the same success value. The argument is cloned for
    /// every attempt.
    ///
    /// ```rust
    /// use playground_core::retry::ExponentialBackoff;
    ///
    /// let add = ExponentialBackoff::default()
    ///     .wrap(|(a, b): (i32, i32)| Ok::<_, std::io::Error>(a + b));
    ///
    /// assert_eq!(add((2, 3)).unwrap(), 5);
    /// ```
    pub fn wrap<F, A, T, E>(self, operation: F) -> impl Fn(A) -> Result<T, RetryError<E>>
    where
        F: Fn(A) -> Result<T, E>,
        A: Clone,
        E: Display,
    {
        move |args: A| self.execute(|| operation(args.clone()))
    }
}

impl Default for ExponentialBackoff {
    /// 20 attempts, 1.0 second starting delay, 1.5x growth.
    fn default() -> Self {
        let config = RetryConfig::default();
        Self {
            max_retries: config.max_retries,
            initial_sleep_time: config.initial_sleep_time,
            backoff_factor: config.backoff_factor,
        }
    }
}

impl TryFrom<RetryConfig> for ExponentialBackoff {
    type Error = ConfigError;

    fn try_from(config: RetryConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

/// Delays past what `Duration` can hold saturate instead of panicking.
fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Builder for configuring `ExponentialBackoff`.
///
/// Unset parameters fall back to [`RetryConfig::default`].
///
/// # Examples
///
/// ```rust
/// use playground_core::retry::ExponentialBackoff;
///
/// let backoff = ExponentialBackoff::builder()
///     .max_retries(5)
///     .initial_sleep_time(0.5)
///     .backoff_factor(2.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(backoff.max_retries(), 5);
/// ```
#[derive(Debug, Default)]
pub struct ExponentialBackoffBuilder {
    max_retries: Option<u32>,
    initial_sleep_time: Option<f64>,
    backoff_factor: Option<f64>,
}

impl ExponentialBackoffBuilder {
    /// Set the maximum number of attempts.
    ///
    /// Default: 20
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Set the starting delay in seconds.
    ///
    /// Default: 1.0
    pub fn initial_sleep_time(mut self, secs: f64) -> Self {
        self.initial_sleep_time = Some(secs);
        self
    }

    /// Set the growth factor.
    ///
    /// Default: 1.5
    pub fn backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = Some(factor);
        self
    }

    /// Build the `ExponentialBackoff`, rejecting negative or non-finite numbers.
    pub fn build(self) -> Result<ExponentialBackoff, ConfigError> {
        let defaults = RetryConfig::default();
        ExponentialBackoff::new(RetryConfig {
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            initial_sleep_time: self.initial_sleep_time.unwrap_or(defaults.initial_sleep_time),
            backoff_factor: self.backoff_factor.unwrap_or(defaults.backoff_factor),
        })
    }
}
