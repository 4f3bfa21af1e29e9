//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)            environment (XUI_*)
//!     → loader.rs (parse)           → loader.rs (from_env)
//!              ↘                   ↙
//!               validation.rs (semantic checks)
//!                     → XuiConfig (validated, immutable)
//!                     → handed to XuiApi at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the client is built
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{from_env, load_config, ConfigError};
pub use schema::XuiConfig;
pub use schema::{ObservabilityConfig, PanelConfig, RetryConfig, TimeoutConfig, TlsConfig};
