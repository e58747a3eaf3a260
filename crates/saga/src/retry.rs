//! Bounded retry for transient failures.
//!
//! The default policy makes three attempts with a fixed 300ms pause between
//! them: no exponential growth, no jitter. [`Backoff::Exponential`] is
//! available for callers that want it.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Delay strategy between attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// Same pause before every retry.
    Fixed(Duration),
    /// `initial * multiplier^(attempt - 1)`, capped at `max`.
    Exponential {
        initial: Duration,
        multiplier: f64,
        max: Duration,
    },
}

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(3, Duration::from_millis(300))
    }
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fixed(delay),
        }
    }

    pub fn exponential(max_attempts: u32, initial: Duration, multiplier: f64, max: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Exponential {
                initial,
                multiplier,
                max,
            },
        }
    }

    /// Pause after the failed `attempt` (1-based) before the next one.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match &self.backoff {
            Backoff::Fixed(delay) => *delay,
            Backoff::Exponential {
                initial,
                multiplier,
                max,
            } => {
                let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
                let secs = initial.as_secs_f64() * multiplier.powi(exponent);
                if !secs.is_finite() || secs >= max.as_secs_f64() {
                    *max
                } else {
                    Duration::from_secs_f64(secs)
                }
            }
        }
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Runs `op` until it succeeds or the policy is exhausted.
///
/// `op` receives the 1-based attempt number. The last error is returned
/// when every attempt fails; no pause follows the final attempt.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.attempts();
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => {
                tracing::warn!(attempt, error = %e, "retries exhausted");
                return Err(e);
            }
            Err(e) => {
                let delay = policy.delay_after(attempt);
                tracing::debug!(attempt, ?delay, error = %e, "attempt failed, retrying");
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
