//! Proxy user accounts and their traffic counters.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Client identifier. Inbound settings carry a UUID (or password for trojan),
/// traffic endpoints carry the panel's numeric row ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Numeric(i64),
    Uuid(String),
}

impl ClientId {
    pub fn random() -> Self {
        ClientId::Uuid(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientId::Numeric(id) => write!(f, "{}", id),
            ClientId::Uuid(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ClientId {
    fn from(id: i64) -> Self {
        ClientId::Numeric(id)
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        ClientId::Uuid(id.to_string())
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        ClientId::Uuid(id)
    }
}

impl From<Uuid> for ClientId {
    fn from(id: Uuid) -> Self {
        ClientId::Uuid(id.to_string())
    }
}

/// Telegram chat ID; older panels store it as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TelegramId {
    Numeric(i64),
    Text(String),
}

/// A client as returned by traffic endpoints or embedded in inbound settings.
///
/// Fields left at their default are omitted when the client is sent back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub email: String,
    pub enable: bool,
    pub id: ClientId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_id: Option<i64>,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub up: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub down: i64,

    /// Unix milliseconds; negative values mean "days after first use".
    #[serde(default, skip_serializing_if = "is_zero")]
    pub expiry_time: i64,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub total: i64,
    /// Auto-renew period in days.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub reset: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flow: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit_ip: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_id: String,
    #[serde(default, deserialize_with = "empty_tg_id", skip_serializing_if = "Option::is_none")]
    pub tg_id: Option<TelegramId>,
    /// Traffic limit in bytes despite the key name.
    #[serde(rename = "totalGB", default, skip_serializing_if = "is_zero")]
    pub total_gb: i64,
}

impl Client {
    /// An enabled client with a fresh UUID.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            enable: true,
            id: ClientId::random(),
            inbound_id: None,
            up: 0,
            down: 0,
            expiry_time: 0,
            total: 0,
            reset: 0,
            flow: String::new(),
            limit_ip: 0,
            sub_id: String::new(),
            tg_id: None,
            total_gb: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<ClientId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_inbound_id(mut self, inbound_id: i64) -> Self {
        self.inbound_id = Some(inbound_id);
        self
    }

    pub fn with_total_gb(mut self, bytes: i64) -> Self {
        self.total_gb = bytes;
        self
    }

    pub fn with_expiry_time(mut self, unix_millis: i64) -> Self {
        self.expiry_time = unix_millis;
        self
    }

    /// Bytes transferred in both directions.
    pub fn used_traffic(&self) -> i64 {
        self.up.saturating_add(self.down)
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn empty_tg_id<'de, D>(deserializer: D) -> Result<Option<TelegramId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<TelegramId>::deserialize(deserializer)?;
    Ok(match id {
        Some(TelegramId::Text(text)) if text.is_empty() => None,
        other => other,
    })
}
