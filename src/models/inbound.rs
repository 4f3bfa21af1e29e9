//! Inbound listeners and their nested settings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

use crate::models::client::Client;
use crate::models::json_string;

/// Protocol settings of an inbound. Keys not modelled here (e.g. shadowsocks
/// `method`) are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub decryption: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fallbacks: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Transport/security settings of an inbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSettings {
    #[serde(default = "default_security")]
    pub security: String,
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default)]
    pub tcp_settings: Map<String, Value>,
    #[serde(default)]
    pub kcp_settings: Map<String, Value>,
    #[serde(default)]
    pub external_proxy: Vec<Value>,
    #[serde(default)]
    pub reality_settings: Map<String, Value>,
    #[serde(default)]
    pub xtls_settings: Map<String, Value>,
    #[serde(default)]
    pub tls_settings: Map<String, Value>,
    /// wsSettings, grpcSettings, sockopt and anything newer.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StreamSettings {
    pub fn new(security: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            security: security.into(),
            network: network.into(),
            ..Self::default()
        }
    }
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            security: default_security(),
            network: default_network(),
            tcp_settings: Map::new(),
            kcp_settings: Map::new(),
            external_proxy: Vec::new(),
            reality_settings: Map::new(),
            xtls_settings: Map::new(),
            tls_settings: Map::new(),
            extra: Map::new(),
        }
    }
}

fn default_security() -> String {
    "none".to_string()
}

fn default_network() -> String {
    "tcp".to_string()
}

/// Traffic sniffing settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sniffing {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub dest_override: Vec<String>,
    #[serde(default)]
    pub metadata_only: bool,
    #[serde(default)]
    pub route_only: bool,
}

impl Sniffing {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

/// A proxy listener configured on the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    pub enable: bool,
    pub port: u16,
    pub protocol: String,
    #[serde(deserialize_with = "json_string::deserialize", serialize_with = "json_string::serialize")]
    pub settings: Settings,
    #[serde(deserialize_with = "json_string::deserialize", serialize_with = "json_string::serialize")]
    pub stream_settings: StreamSettings,
    #[serde(deserialize_with = "json_string::deserialize", serialize_with = "json_string::serialize")]
    pub sniffing: Sniffing,

    #[serde(default)]
    pub listen: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub up: i64,
    #[serde(default)]
    pub down: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub expiry_time: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub client_stats: Vec<Client>,

    #[serde(default)]
    pub tag: String,
}

impl Inbound {
    /// An enabled inbound with empty settings.
    pub fn new(port: u16, protocol: impl Into<String>) -> Self {
        Self {
            enable: true,
            port,
            protocol: protocol.into(),
            settings: Settings::default(),
            stream_settings: StreamSettings::default(),
            sniffing: Sniffing::default(),
            listen: String::new(),
            remark: String::new(),
            id: 0,
            up: 0,
            down: 0,
            total: 0,
            expiry_time: 0,
            client_stats: Vec::new(),
            tag: String::new(),
        }
    }

    /// Body for the add/update endpoints: scalar fields plus the nested
    /// settings as JSON-encoded strings.
    pub fn to_payload(&self) -> Result<Value, serde_json::Error> {
        Ok(json!({
            "remark": self.remark,
            "enable": self.enable,
            "listen": self.listen,
            "port": self.port,
            "protocol": self.protocol,
            "expiryTime": self.expiry_time,
            "settings": json_string::encode(&self.settings)?,
            "streamSettings": json_string::encode(&self.stream_settings)?,
            "sniffing": json_string::encode(&self.sniffing)?,
        }))
    }

    /// Find a settings client by email. Its `id` is the UUID the client
    /// endpoints expect, unlike the numeric ID in `client_stats`.
    pub fn find_client(&self, email: &str) -> Option<&Client> {
        self.settings.clients.iter().find(|c| c.email == email)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
