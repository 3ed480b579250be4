//! Retrying rate-limited operations with exponential backoff.
//!
//! Only failures whose message mentions a rate limit are retried (see
//! [`is_rate_limit_error`]). Anything else goes straight back to the caller.
//!
//! # Key Types
//!
//! - [`ExponentialBackoff`] - the retry policy and its blocking loop
//! - [`retry_with_exponential_backoff`] - wrap a function in one call
//!
//! # Examples
//!
//! ```rust
//! use playground_core::retry::retry_with_exponential_backoff;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let complete = retry_with_exponential_backoff(
//!     |prompt: String| Ok::<_, std::io::Error>(format!("echo: {prompt}")),
//!     20,
//!     1.0,
//!     1.5,
//! )?;
//!
//! assert_eq!(complete("hello".to_string())?, "echo: hello");
//! # Ok(())
//! # }
//! ```

mod classify;
mod exponential;

pub use classify::is_rate_limit_error;
pub use exponential::{ExponentialBackoff, ExponentialBackoffBuilder};

use crate::error::{ConfigError, RetryError};
use std::fmt::Display;

/// Wrap `operation` so rate-limit failures are retried.
///
/// `max_retries` bounds the total number of attempts. Before retry `n` the
/// caller's thread sleeps `initial_sleep_time * backoff_factor^n` seconds.
/// The usual values are `20`, `1.0` and `1.5`.
pub fn retry_with_exponential_backoff<F, A, T, E>(
    operation: F,
    max_retries: u32,
    initial_sleep_time: f64,
    backoff_factor: f64,
) -> Result<impl Fn(A) -> Result<T, RetryError<E>>, ConfigError>
where
    F: Fn(A) -> Result<T, E>,
    A: Clone,
    E: Display,
{
    let backoff = ExponentialBackoff::builder()
        .max_retries(max_retries)
        .initial_sleep_time(initial_sleep_time)
        .backoff_factor(backoff_factor)
        .build()?;
    Ok(backoff.wrap(operation))
}
