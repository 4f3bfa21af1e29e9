//! Retry logic.
//!
//! # Responsibilities
//! - Classify each failure as retryable or fatal
//! - Re-run retryable failures with linear backoff up to the attempt budget
//! - Surface exhaustion distinctly from fatal errors
//!
//! # Design Decisions
//! - Fatal errors stop the loop on the attempt that produced them
//! - Attempt budget is fixed per client instance, not per call
//! - Sleeping goes through `Sleeper` so tests can record delays instead of waiting

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::resilience::backoff::linear_backoff;

/// Failure classification used by [`RetryPolicy`].
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// The only suspension point besides network I/O.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Why a retried operation gave up.
#[derive(Debug)]
pub enum RetryError<E> {
    /// A non-retryable failure; returned on the attempt that produced it.
    Fatal(E),
    /// Every attempt failed with a retryable error; carries the last one.
    Exhausted { attempts: u32, last: E },
    /// The loop ran zero times (an attempt budget of 0).
    NoAttempts,
}

/// Bounded retry with linear backoff.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_unit: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts,
            backoff_unit,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the sleeper (e.g., with a recording fake).
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_unit(&self) -> Duration {
        self.backoff_unit
    }

    /// Run `operation` until it succeeds, fails fatally, or the budget runs out.
    ///
    /// `operation` receives the 1-based attempt number. `label` names the endpoint in logs and metrics.
    pub async fn execute<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, RetryError<E>>
    where
        E: Retryable + Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        for attempt in 1..=self.max_attempts {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    if attempt == self.max_attempts {
                        tracing::warn!(
                            endpoint = %label,
                            attempts = attempt,
                            error = %e,
                            "Retry budget exhausted"
                        );
                        return Err(RetryError::Exhausted { attempts: attempt, last: e });
                    }
                    let delay = linear_backoff(attempt + 1, self.backoff_unit);
                    tracing::warn!(
                        endpoint = %label,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay = ?delay,
                        error = %e,
                        "Request failed, retrying"
                    );
                    crate::observability::metrics::record_retry(label);
                    self.sleeper.sleep(delay).await;
                }
                Err(e) => return Err(RetryError::Fatal(e)),
            }
        }
        Err(RetryError::NoAttempts)
    }
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("backoff_unit", &self.backoff_unit)
            .finish()
    }
}
