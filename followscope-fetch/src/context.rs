//! Fetch settings.

use std::time::Duration;

use crate::host::http::DEFAULT_TIMEOUT_SECS;
use crate::retry::RetryPolicy;

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry and pause behaviour.
    pub retry: RetryPolicy,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

impl FetchSettings {
    /// Creates settings with custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates settings with a custom retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FetchSettings::default();
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.retry.max_attempts, 5);
        assert_eq!(settings.retry.courtesy_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_builders() {
        let settings = FetchSettings::default()
            .with_timeout(Duration::from_secs(3))
            .with_retry(RetryPolicy::no_retry());
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.retry.max_attempts, 1);
    }
}
