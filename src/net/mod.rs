//! Network subsystem: one HTTP round trip to the panel.
//!
//! # Data Flow
//! ```text
//! HttpRequest (method, url, headers, json body, session cookie)
//!     → transport.rs (reqwest client, TLS mode from tls.rs)
//!     → HttpResponse (status, cookies, body) | TransportError
//! ```
//!
//! # Design Decisions
//! - `Transport` is a trait so the request engine can be driven by an
//!   in-memory fake in tests
//! - Connection/timeout failures are reported distinctly so the retry
//!   policy can classify them
//! - HTTP status is returned as-is; status checks belong to the engine

pub mod tls;
pub mod transport;

pub use tls::TlsMode;
pub use transport::{
    HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportError,
};
