//! Retry policy with linear backoff
//!
//! The API client re-issues failed attempts a bounded number of times,
//! waiting `backoff_base × attempt_number` between attempts. The budget is
//! fixed at client construction; uploads force it to zero because a
//! multipart payload may not be safely re-sent.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry configuration
///
/// `max_retries` counts *extra* attempts: a budget of 1 means two attempts
/// total. The delay before re-issuing attempt `n` (1-based) is
/// `backoff_base × n`, so the default produces the sequence 1s, 2s, …
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of extra attempts after the first
    pub max_retries: u32,
    /// Base delay unit for linear backoff
    pub backoff_base: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff_base: Duration::from_millis(1000),
        }
    }
}

impl RetryConfig {
    /// Create a config with no retries (single attempt)
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            backoff_base: Duration::ZERO,
        }
    }

    /// Create a config for patient retries (slow backends)
    #[must_use]
    pub fn patient() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_millis(1000),
        }
    }

    /// Calculate the delay to wait before issuing the given attempt
    ///
    /// `attempt` is the 1-based index of the attempt about to run; attempt 0
    /// (the first issue) never waits.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.backoff_base, Duration::from_millis(1000));
    }

    #[test]
    fn test_linear_delay() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(3000));
    }

    #[test]
    fn test_no_retry() {
        let config = RetryConfig::no_retry();
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.delay_for_attempt(1), Duration::ZERO);
    }
}
