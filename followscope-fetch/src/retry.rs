//! Retry policy and per-call retry state.
//!
//! [`RetryPolicy`] is the static configuration; [`RetryState`] is the state
//! machine a single logical fetch walks through. The fetcher asks the state
//! for the next backoff after every retryable failure and stops once the
//! state reports the attempt cap.

use std::time::Duration;

/// Default number of attempts per logical fetch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Strategy for retrying rate-limited requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for every later attempt.
    pub base_delay: Duration,
    /// Upper bound for a single backoff delay.
    pub max_delay: Duration,
    /// Fixed pause after every attempt that ends a call.
    pub courtesy_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt cap and one-second delays.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            courtesy_delay: Duration::from_secs(1),
        }
    }

    /// Disables retries and pauses.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            courtesy_delay: Duration::ZERO,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the courtesy pause.
    pub fn with_courtesy_delay(mut self, delay: Duration) -> Self {
        self.courtesy_delay = delay;
        self
    }

    /// Calculates the backoff after the failed attempt with 0-based index
    /// `attempt`: `base_delay * 2^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

// ============================================================================
// Retry State
// ============================================================================

/// Attempt counter for one logical fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    attempt: u32,
    next_delay: Duration,
}

impl RetryState {
    /// State before the first attempt.
    pub fn start(policy: &RetryPolicy) -> Self {
        Self {
            attempt: 0,
            next_delay: policy.delay_for_attempt(0),
        }
    }

    /// Number of attempts made so far, counting the current one.
    pub fn attempts_made(&self) -> u32 {
        self.attempt + 1
    }

    /// Moves to the next attempt.
    ///
    /// Returns the delay to wait first, or `None` if the current attempt
    /// was the last one the policy allows.
    pub fn advance(&mut self, policy: &RetryPolicy) -> Option<Duration> {
        if self.attempts_made() >= policy.max_attempts.max(1) {
            return None;
        }

        let wait = self.next_delay;
        self.attempt += 1;
        self.next_delay = policy.delay_for_attempt(self.attempt);
        Some(wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(8));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(16));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::new(10).with_base_delay(Duration::from_secs(10));

        // Should be capped at 60 seconds
        assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(60));
        assert_eq!(policy.delay_for_attempt(40), Duration::from_secs(60));
    }

    #[test]
    fn test_state_walks_schedule_then_stops() {
        let policy = RetryPolicy::default();
        let mut state = RetryState::start(&policy);

        let mut waits = Vec::new();
        while let Some(delay) = state.advance(&policy) {
            waits.push(delay.as_secs());
        }

        assert_eq!(waits, vec![1, 2, 4, 8]);
        assert_eq!(state.attempts_made(), 5);
        assert_eq!(state.advance(&policy), None);
    }

    #[test]
    fn test_single_attempt_policy_never_advances() {
        let policy = RetryPolicy::no_retry();
        let mut state = RetryState::start(&policy);
        assert_eq!(state.advance(&policy), None);
        assert_eq!(state.attempts_made(), 1);
    }

    #[test]
    fn test_zero_attempts_treated_as_one() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        let mut state = RetryState::start(&policy);
        assert_eq!(state.advance(&policy), None);
    }
}
