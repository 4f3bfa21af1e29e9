//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to panel:
//!     → timeouts.rs (deadline per attempt; expiry becomes a retryable timeout)
//!     → On failure: retries.rs (classify, sleep per backoff.rs, try again)
//! ```
//!
//! # Design Decisions
//! - Only connection and timeout failures are retried
//! - HTTP error statuses and panel-level failures propagate immediately
//! - Linear backoff without jitter; the sleep is injectable for tests

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{RetryError, RetryPolicy, Retryable, Sleeper, TokioSleeper};
