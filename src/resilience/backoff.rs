//! Linear backoff.

use std::time::Duration;

/// Delay to wait before `next_attempt` (1-based).
///
/// The first attempt never waits; attempt N waits N units.
pub fn linear_backoff(next_attempt: u32, unit: Duration) -> Duration {
    if next_attempt <= 1 {
        return Duration::ZERO;
    }
    unit.saturating_mul(next_attempt)
}
