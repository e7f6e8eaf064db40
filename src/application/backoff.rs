//! Retry with exponential backoff for transient failures.
//!
//! [`BackoffPolicy::run`] executes a fallible operation and retries it while it
//! fails with a retryable [`AppError`]. Delays start at `initial_delay` and are
//! multiplied by `multiplier` after every failed attempt; once the next delay
//! would reach `max_delay`, the policy gives up and reports a generic internal
//! error. Validation, not-found and duplicate-key errors are returned
//! immediately.
//!
//! Each call builds its own [`BackoffSchedule`], so concurrent or consecutive
//! requests never share retry timing.

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tracing::{error, warn};

use crate::error::AppError;

/// Exponential backoff parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    /// 100 ms initial delay, doubling, giving up at 10 s.
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(100),
            multiplier: 2.0,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl BackoffPolicy {
    /// Creates a new policy.
    ///
    /// `multiplier` must be greater than 1.0 and `initial_delay` non-zero,
    /// otherwise the schedule would never reach `max_delay`; configuration
    /// validation enforces both.
    pub fn new(initial_delay: Duration, multiplier: f64, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            multiplier,
            max_delay,
        }
    }

    /// Returns a fresh delay sequence for one invocation.
    pub fn schedule(&self) -> BackoffSchedule {
        BackoffSchedule {
            next_delay: self.initial_delay,
            multiplier: self.multiplier,
            max_delay: self.max_delay,
        }
    }

    /// Runs `action`, retrying transient failures according to the policy.
    ///
    /// # Errors
    ///
    /// - Terminal errors from `action` are returned unchanged on first sight.
    /// - When the schedule is exhausted, the last cause is logged and a generic
    ///   [`AppError::Internal`] is returned.
    pub async fn run<T, A, Fut>(&self, action: A) -> Result<T, AppError>
    where
        A: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let outcome = RetryIf::start(self.schedule(), action, |err: &AppError| {
            if err.is_retryable() {
                warn!(error = %err, "Operation failed with a transient error");
                true
            } else {
                false
            }
        })
        .await;

        match outcome {
            Err(err) if err.is_retryable() => {
                error!(error = %err, "Giving up after exhausting retry delays");
                Err(AppError::internal(
                    format!("Retries exhausted: {err}"),
                    json!({}),
                ))
            }
            other => other,
        }
    }
}

/// Delay sequence `initial_delay * multiplier^n`, ending before `max_delay`.
#[derive(Debug, Clone)]
pub struct BackoffSchedule {
    next_delay: Duration,
    multiplier: f64,
    max_delay: Duration,
}

impl Iterator for BackoffSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.next_delay >= self.max_delay || self.next_delay.is_zero() {
            return None;
        }

        let delay = self.next_delay;
        self.next_delay = delay.mul_f64(self.multiplier).min(self.max_delay);
        Some(delay)
    }
}
