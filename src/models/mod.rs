//! Typed panel data.
//!
//! # Field-name mapping
//! The panel speaks camelCase JSON with a few irregular keys. Rust fields map as:
//!
//! | Type | Rust field | JSON key |
//! |---|---|---|
//! | `Client` | `inbound_id` | `inboundId` |
//! | `Client` | `expiry_time` | `expiryTime` |
//! | `Client` | `limit_ip` | `limitIp` |
//! | `Client` | `sub_id` | `subId` |
//! | `Client` | `tg_id` | `tgId` |
//! | `Client` | `total_gb` | `totalGB` |
//! | `Inbound` | `stream_settings` | `streamSettings` |
//! | `Inbound` | `expiry_time` | `expiryTime` |
//! | `Inbound` | `client_stats` | `clientStats` |
//! | `StreamSettings` | `tcp_settings` / `kcp_settings` | `tcpSettings` / `kcpSettings` |
//! | `StreamSettings` | `external_proxy` | `externalProxy` |
//! | `StreamSettings` | `reality_settings` / `xtls_settings` / `tls_settings` | `realitySettings` / `xtlsSettings` / `tlsSettings` |
//! | `Sniffing` | `dest_override` / `metadata_only` / `route_only` | `destOverride` / `metadataOnly` / `routeOnly` |
//! | `ServerStatus` | `cpu_cores` / `logical_pro` / `cpu_speed_mhz` | `cpuCores` / `logicalPro` / `cpuSpeedMhz` |
//! | `ServerStatus` | `tcp_count` / `udp_count` | `tcpCount` / `udpCount` |
//! | `ServerStatus` | `net_io` / `net_traffic` | `netIO` / `netTraffic` |
//! | `ServerStatus` | `public_ip` / `app_stats` | `publicIP` / `appStats` |
//! | `XrayInfo` | `error_msg` | `errorMsg` |
//!
//! # Double-encoded fields
//! `Inbound::settings`, `Inbound::stream_settings` and `Inbound::sniffing`
//! arrive either as nested objects or as JSON-encoded strings. They are read
//! through [`json_string`], which decodes a string first and then parses the
//! object, and they are written back as strings, the form the panel expects.

pub mod client;
pub mod inbound;
pub mod json_string;
pub mod server;

pub use client::{Client, ClientId, TelegramId};
pub use inbound::{Inbound, Settings, Sniffing, StreamSettings};
pub use server::{AppStats, MemoryInfo, NetworkIo, NetworkTraffic, PublicIp, ServerStatus, XrayInfo};
