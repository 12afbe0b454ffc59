//! Wait mechanisms
//!
//! Polling waits layered on `OnboardDriver::find_elements`. A wait either
//! returns the matches it saw or fails with `Timeout`; it never retries
//! past its deadline.

use crate::driver::{ElementHandle, OnboardDriver};
use crate::locator::{Locator, Selector};
use crate::result::{ProbeError, ProbeResult};
use std::time::Duration;
use tokio::time::Instant;

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

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

    /// Wait window of a locator's auto-wait options
    #[must_use]
    pub fn for_locator(locator: &Locator) -> Self {
        let opts = locator.options();
        Self {
            timeout_ms: duration_ms(opts.timeout),
            poll_interval_ms: duration_ms(opts.poll_interval),
        }
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

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Poll until `selector` matches at least one element.
///
/// The driver is queried at least once, even with a zero timeout.
pub async fn wait_until_located(
    driver: &dyn OnboardDriver,
    selector: &Selector,
    options: WaitOptions,
) -> ProbeResult<Vec<ElementHandle>> {
    let deadline = Instant::now() + options.timeout();
    loop {
        let found = driver.find_elements(selector).await?;
        if !found.is_empty() {
            return Ok(found);
        }
        let now = Instant::now();
        if now >= deadline {
            return Err(ProbeError::Timeout {
                what: selector.to_string(),
                ms: options.timeout_ms,
            });
        }
        let nap = options.poll_interval().min(deadline - now);
        tokio::time::sleep(nap).await;
    }
}

/// Wait for a screen element to become visible, as the orchestrator does
/// between screens.
pub async fn wait_for_visible(
    driver: &dyn OnboardDriver,
    locator: &Locator,
    options: WaitOptions,
) -> ProbeResult<()> {
    tracing::debug!(locator = %locator, timeout_ms = options.timeout_ms, "waiting for element");
    wait_until_located(driver, locator.selector(), options)
        .await
        .map(|_| ())
        .map_err(|e| match e {
            ProbeError::Timeout { ms, .. } => ProbeError::Timeout {
                what: locator.to_string(),
                ms,
            },
            other => other,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use std::sync::Arc;

    #[test]
    fn test_default_options() {
        let opts = WaitOptions::default();
        assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
        assert_eq!(opts.poll_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_for_locator() {
        let loc = Locator::structural("cta", "button").with_timeout(Duration::from_millis(250));
        let opts = WaitOptions::for_locator(&loc);
        assert_eq!(opts.timeout_ms, 250);
        assert_eq!(opts.poll_interval_ms, 50);
    }

    #[tokio::test]
    async fn test_found_immediately() {
        let driver = MockDriver::new();
        let sel = Selector::css("div.icons__title");
        driver.add_element(sel.clone(), 2);

        let found = wait_until_located(&driver, &sel, WaitOptions::new().with_timeout(0))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_times_out() {
        let driver = MockDriver::new();
        let sel = Selector::css("#never");
        let err = wait_until_located(
            &driver,
            &sel,
            WaitOptions::new().with_timeout(30).with_poll_interval(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProbeError::Timeout { ms: 30, .. }));
    }

    #[tokio::test]
    async fn test_appears_while_polling() {
        let driver = Arc::new(MockDriver::new());
        let sel = Selector::css("#late");

        let writer = Arc::clone(&driver);
        let late = sel.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            writer.add_element(late, 1);
        });

        let found = wait_until_located(
            driver.as_ref(),
            &sel,
            WaitOptions::new().with_timeout(2_000).with_poll_interval(5),
        )
        .await
        .unwrap();
        assert_eq!(found.len(), 1);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_visible_names_locator() {
        let driver = MockDriver::new();
        let loc = Locator::structural("get started button", "button.cta");
        let err = wait_for_visible(&driver, &loc, WaitOptions::new().with_timeout(0))
            .await
            .unwrap_err();
        match err {
            ProbeError::Timeout { what, .. } => assert!(what.contains("get started button")),
            other => panic!("unexpected error {other}"),
        }
    }

    #[tokio::test]
    async fn test_session_error_propagates() {
        let driver = MockDriver::new();
        driver.break_session();
        let err = wait_until_located(&driver, &Selector::css("a"), WaitOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::SessionError { .. }));
    }
}
