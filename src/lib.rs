//! Rust client library for the XUI proxy panel API.
//!
//! Typed operations over inbounds, clients, server status and database
//! backups, on top of a session-authenticated request engine with retry and
//! response validation. An async API lives in [`api`], a blocking one in
//! [`blocking`].

pub mod api;
pub mod blocking;
pub mod config;
pub mod models;
pub mod net;
pub mod observability;
pub mod resilience;

pub use api::{
    ApiCore, ApiError, ApiResult, ClientApi, Credentials, DatabaseApi, InboundApi, ServerApi,
    Session, SessionHandle, XuiApi,
};
pub use config::schema::XuiConfig;
pub use models::{Client, ClientId, Inbound, ServerStatus};
pub use net::TlsMode;
