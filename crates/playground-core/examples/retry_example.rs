//! Example: retrying a rate-limited model call
//!
//! This example demonstrates:
//! 1. A call that is rate limited twice before succeeding
//! 2. A non-rate-limit error that is returned at once
//! 3. Giving up after the retry budget is spent
//!
//! Run with:
//! ```bash
//! RUST_LOG=playground_core=debug cargo run -p playground-core --example retry_example
//! ```

use playground_core::prelude::*;
use std::cell::Cell;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// A simulated model endpoint that fails the first few times
struct UnreliableModel {
    attempts: Cell<u32>,
    fail_count: u32,
    failure: &'static str,
}

impl UnreliableModel {
    fn new(fail_count: u32, failure: &'static str) -> Self {
        Self {
            attempts: Cell::new(0),
            fail_count,
            failure,
        }
    }

    fn complete(&self, prompt: &str) -> Result<String, std::io::Error> {
        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);

        if attempt <= self.fail_count {
            println!("  Attempt {attempt}: FAILED ({})", self.failure);
            Err(std::io::Error::other(self.failure))
        } else {
            println!("  Attempt {attempt}: SUCCESS");
            Ok(format!("completion for {prompt:?}"))
        }
    }
}

fn example_rate_limited() -> anyhow::Result<()> {
    println!("\n=== Example 1: Rate limited twice ===\n");

    let backoff = ExponentialBackoff::builder()
        .max_retries(5)
        .initial_sleep_time(0.1)
        .backoff_factor(1.5)
        .build()?;
    let model = UnreliableModel::new(2, "Error code: 429 - rate_limit_error");

    let start = Instant::now();
    let complete = backoff.wrap(|prompt: String| model.complete(&prompt));
    let result = complete("Tell me a joke".to_string())?;

    println!("\nResult: {result}");
    println!("Total time: {:?}", start.elapsed());
    println!("Expected delays: 150ms + 225ms = ~375ms");
    Ok(())
}

fn example_fatal_error() -> anyhow::Result<()> {
    println!("\n=== Example 2: Invalid API key (not retried) ===\n");

    let model = UnreliableModel::new(u32::MAX, "invalid x-api-key");
    let result = ExponentialBackoff::default().execute(|| model.complete("hello"));

    match result {
        Err(RetryError::Operation(err)) => println!("  Returned immediately: {err}"),
        other => anyhow::bail!("unexpected outcome: {other:?}"),
    }
    Ok(())
}

fn example_exhausted() -> anyhow::Result<()> {
    println!("\n=== Example 3: Rate limited on every attempt ===\n");

    let config = RetryConfig {
        max_retries: 3,
        initial_sleep_time: 0.05,
        ..RetryConfig::from_env()?
    };
    let model = UnreliableModel::new(u32::MAX, "Rate limit exceeded");
    let result = ExponentialBackoff::new(config)?.execute(|| model.complete("hello"));

    match result {
        Err(err @ RetryError::MaxRetriesExceeded { .. }) => println!("  Gave up: {err}"),
        other => anyhow::bail!("unexpected outcome: {other:?}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("==============================================");
    println!("   Playground retry examples ({})", timestamp_str());
    println!("==============================================");

    example_rate_limited()?;
    example_fatal_error()?;
    example_exhausted()?;

    println!("\nAll examples completed successfully!\n");
    Ok(())
}
