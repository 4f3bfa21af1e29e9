//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap each attempt with a deadline
//! - Abandon the in-flight attempt cleanly on expiry
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - An expired attempt is a `TransportError::Timeout`, so the retry policy
//!   treats it like any other timeout

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::net::TransportError;

/// Run one attempt under `deadline`.
pub async fn with_deadline<T, F>(deadline: Duration, attempt: F) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    match timeout(deadline, attempt).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::Timeout(format!(
            "no response within {:?}",
            deadline
        ))),
    }
}
