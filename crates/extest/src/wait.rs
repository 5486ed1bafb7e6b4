//! Polling waits with explicit budgets.
//!
//! Every blocking wait takes a timeout. When it runs out the wait fails with
//! [`ExtestError::Timeout`], which carries the budget and a description of what
//! was awaited. Not-found and stale conditions raised while polling count as
//! "not yet"; any other error ends the wait immediately.

use crate::result::{ExtestError, ExtestResult};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll `condition` until it yields a value or the budget runs out.
///
/// The condition is always checked at least once.
pub async fn wait_until<T, F, Fut>(
    options: &WaitOptions,
    description: &str,
    mut condition: F,
) -> ExtestResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ExtestResult<Option<T>>>,
{
    let start = Instant::now();
    loop {
        match condition().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) if e.is_retryable() => {}
            Err(e) => return Err(e),
        }
        if start.elapsed() >= options.timeout() {
            return Err(ExtestError::Timeout {
                ms: options.timeout_ms,
                waited_for: description.to_string(),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Poll `probe` until two consecutive readings agree, returning that reading
pub async fn wait_for_stable<T, F, Fut>(
    options: &WaitOptions,
    description: &str,
    mut probe: F,
) -> ExtestResult<T>
where
    T: PartialEq,
    F: FnMut() -> Fut,
    Fut: Future<Output = ExtestResult<T>>,
{
    let start = Instant::now();
    let mut previous: Option<T> = None;
    loop {
        match probe().await {
            Ok(reading) => {
                if previous.as_ref() == Some(&reading) {
                    return Ok(reading);
                }
                previous = Some(reading);
            }
            Err(e) if e.is_retryable() => previous = None,
            Err(e) => return Err(e),
        }
        if start.elapsed() >= options.timeout() {
            return Err(ExtestError::Timeout {
                ms: options.timeout_ms,
                waited_for: description.to_string(),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}
