//! Error types for the playground helpers.
//!
//! Two families live here: [`RetryError`], returned by the retrying invoker,
//! and [`ConfigError`], returned while loading or validating retry settings.

use thiserror::Error;

/// Failure returned by an operation run under [`crate::retry::ExponentialBackoff`].
///
/// The invoker only ever produces two outcomes on failure: the operation's own
/// error, handed back untouched, or a synthesized "gave up" error once the
/// retry budget is spent.
#[derive(Debug, Error, PartialEq)]
pub enum RetryError<E> {
    /// The operation failed with an error that is not a rate limit.
    ///
    /// Displays exactly like the wrapped error.
    #[error("{0}")]
    Operation(E),

    /// Every attempt was rate limited.
    ///
    /// Only the configured limit is kept; the last rate-limit error is dropped.
    #[error("Maximum retries {max_retries} exceeded")]
    MaxRetriesExceeded {
        /// The configured retry limit
        max_retries: u32,
    },
}

impl<E> RetryError<E> {
    /// Returns `true` if the retry budget ran out.
    pub fn is_max_retries_exceeded(&self) -> bool {
        matches!(self, Self::MaxRetriesExceeded { .. })
    }

    /// Returns the operation's own error, if that is what stopped the retries.
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            Self::Operation(err) => Some(err),
            Self::MaxRetriesExceeded { .. } => None,
        }
    }
}

/// Errors raised while building a retry configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A delay or multiplier is negative, NaN or infinite.
    #[error("Invalid {field}: {value} (must be finite and non-negative)")]
    InvalidValue {
        /// Name of the offending setting
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// An environment variable held something that does not parse.
    #[error("Invalid value for {var}: {value:?}")]
    Env {
        /// Name of the environment variable
        var: &'static str,
        /// The raw value that failed to parse
        value: String,
    },

    /// A TOML document could not be parsed into a retry configuration.
    #[error("Failed to parse retry configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
