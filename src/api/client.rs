//! Client façade: proxy users attached to inbounds.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::api::core::ApiCore;
use crate::api::endpoint::Endpoint;
use crate::api::error::{ApiError, ApiResult};
use crate::api::session::Session;
use crate::models::Client;

const INBOUNDS: &str = "panel/api/inbounds";

/// Sentinel the panel returns instead of an empty IP list.
const NO_IP_RECORD: &str = "No IP Record";

#[derive(Debug, Clone)]
pub struct ClientApi {
    core: Arc<ApiCore>,
}

impl ClientApi {
    pub fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    pub fn session(&self) -> Option<Session> {
        self.core.session()
    }

    /// Traffic record of a client, `None` when the panel has none.
    pub async fn get_by_email(&self, email: &str) -> ApiResult<Option<Client>> {
        tracing::info!(email, "Getting client");
        let envelope = self
            .core
            .get(&Endpoint::get(INBOUNDS).segment("getClientTraffics").param(email))
            .await?;
        envelope.into_optional_obj()
    }

    /// IP addresses the client connected from.
    pub async fn get_ips(&self, email: &str) -> ApiResult<Vec<String>> {
        tracing::info!(email, "Getting client IPs");
        let envelope = self
            .core
            .post(&Endpoint::post(INBOUNDS).segment("clientIps").param(email), json!({}))
            .await?;
        parse_ips(envelope.obj)
    }

    /// Add clients to an inbound.
    pub async fn add(&self, inbound_id: i64, clients: &[Client]) -> ApiResult<()> {
        tracing::info!(inbound_id, count = clients.len(), "Adding clients");
        let body = json!({
            "id": inbound_id,
            "settings": encode_clients(clients)?,
        });
        self.core.post(&Endpoint::post(INBOUNDS).segment("addClient"), body).await?;
        tracing::info!(inbound_id, "Clients added");
        Ok(())
    }

    /// Replace the client currently stored under `client_uuid`.
    ///
    /// `client.inbound_id` names the inbound. `client.id` may differ from
    /// `client_uuid` to rotate the client's UUID.
    pub async fn update(&self, client_uuid: &str, client: &Client) -> ApiResult<()> {
        tracing::info!(client_uuid, email = %client.email, "Updating client");
        let body = json!({
            "id": client.inbound_id,
            "settings": encode_clients(std::slice::from_ref(client))?,
        });
        self.core
            .post(&Endpoint::post(INBOUNDS).segment("updateClient").param(client_uuid), body)
            .await?;
        tracing::info!(email = %client.email, "Client updated");
        Ok(())
    }

    pub async fn reset_ips(&self, email: &str) -> ApiResult<()> {
        tracing::info!(email, "Resetting client IPs");
        self.core
            .post(&Endpoint::post(INBOUNDS).segment("clearClientIps").param(email), json!({}))
            .await?;
        Ok(())
    }

    pub async fn reset_stats(&self, inbound_id: i64, email: &str) -> ApiResult<()> {
        tracing::info!(inbound_id, email, "Resetting client traffic");
        self.core
            .post(
                &Endpoint::post(INBOUNDS)
                    .param(inbound_id)
                    .segment("resetClientTraffic")
                    .param(email),
                json!({}),
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, inbound_id: i64, client_uuid: &str) -> ApiResult<()> {
        tracing::info!(inbound_id, client_uuid, "Deleting client");
        self.core
            .post(
                &Endpoint::post(INBOUNDS)
                    .param(inbound_id)
                    .segment("delClient")
                    .param(client_uuid),
                json!({}),
            )
            .await?;
        tracing::info!(inbound_id, client_uuid, "Client deleted");
        Ok(())
    }

    /// Remove clients whose traffic or time quota is used up.
    pub async fn delete_depleted(&self, inbound_id: i64) -> ApiResult<()> {
        tracing::info!(inbound_id, "Deleting depleted clients");
        self.core
            .post(&Endpoint::post(INBOUNDS).segment("delDepletedClients").param(inbound_id), json!({}))
            .await?;
        Ok(())
    }

    /// Emails of clients currently connected.
    pub async fn online(&self) -> ApiResult<Vec<String>> {
        tracing::info!("Getting online clients");
        let envelope = self.core.post(&Endpoint::post(INBOUNDS).segment("onlines"), json!({})).await?;
        Ok(envelope.into_optional_obj()?.unwrap_or_default())
    }

    /// Traffic records for a settings UUID.
    pub async fn get_traffic_by_id(&self, client_uuid: &str) -> ApiResult<Vec<Client>> {
        tracing::info!(client_uuid, "Getting client traffic by ID");
        let envelope = self
            .core
            .get(&Endpoint::get(INBOUNDS).segment("getClientTrafficsById").param(client_uuid))
            .await?;
        Ok(envelope.into_optional_obj()?.unwrap_or_default())
    }
}

/// `settings` form field: `{"clients": [...]}` as a JSON string.
fn encode_clients(clients: &[Client]) -> ApiResult<String> {
    let settings = serde_json::to_value(clients)?;
    Ok(serde_json::to_string(&json!({ "clients": settings }))?)
}

fn parse_ips(obj: Option<Value>) -> ApiResult<Vec<String>> {
    match obj {
        None => Ok(Vec::new()),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() || text == NO_IP_RECORD {
                return Ok(Vec::new());
            }
            if let Ok(ips) = serde_json::from_str::<Vec<String>>(text) {
                return Ok(ips);
            }
            Ok(text
                .split(',')
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
                .map(str::to_string)
                .collect())
        }
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(ip) => ip,
                other => other.to_string(),
            })
            .collect()),
        Some(other) => Err(ApiError::MalformedResponse(format!(
            "unexpected client IP payload: {}",
            other
        ))),
    }
}
