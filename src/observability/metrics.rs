//! Metrics collection.
//!
//! # Metrics
//! - `xui_requests_total` (counter): requests by method, endpoint, outcome
//! - `xui_request_duration_seconds` (histogram): end-to-end latency including retries
//! - `xui_retries_total` (counter): retried attempts by endpoint
//! - `xui_logins_total` (counter): login attempts by outcome

use std::time::Instant;

use metrics::{counter, histogram};

/// Record a finished logical request.
pub fn record_request(method: &str, endpoint: &str, outcome: &str, start: Instant) {
    counter!(
        "xui_requests_total",
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    histogram!(
        "xui_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_retry(endpoint: &str) {
    counter!("xui_retries_total", "endpoint" => endpoint.to_string()).increment(1);
}

pub fn record_login(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("xui_logins_total", "outcome" => outcome).increment(1);
}
