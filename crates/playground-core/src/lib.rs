#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Small helpers shared by the LLM playground.
//!
//! - **Rate-limit retries** via [`retry::ExponentialBackoff`]: an operation is
//!   re-run with growing, blocking waits while its error message says it was
//!   rate limited. Any other error is returned at once.
//! - **Artifact timestamps** via [`timestamp::timestamp_str`], formatted as
//!   `YYYY-MM-DD_HHMMSS` in UTC.
//! - **Retry settings** via [`config::RetryConfig`], loadable from the
//!   environment or TOML.
//!
//! # Examples
//!
//! ```rust
//! use playground_core::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backoff = ExponentialBackoff::builder()
//!     .max_retries(3)
//!     .initial_sleep_time(0.01)
//!     .build()?;
//!
//! let run_name = backoff.execute(|| Ok::<_, std::io::Error>(format!("run-{}", timestamp_str())))?;
//! assert!(run_name.starts_with("run-"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod paths;
pub mod retry;
pub mod timestamp;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use playground_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::RetryConfig;
    pub use crate::error::{ConfigError, RetryError};
    pub use crate::paths::repo_root;
    pub use crate::retry::{
        ExponentialBackoff, ExponentialBackoffBuilder, is_rate_limit_error,
        retry_with_exponential_backoff,
    };
    pub use crate::timestamp::{TIMESTAMP_FORMAT, format_timestamp, timestamp_str};
}
