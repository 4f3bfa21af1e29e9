//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request engine, retry policy and façades produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms via the `metrics` facade)
//!
//! Consumers:
//!     → whatever subscriber / recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a global recorder; `init_logging` is opt-in
//! - Passwords, login secrets and session values are never logged

pub mod logging;
pub mod metrics;
