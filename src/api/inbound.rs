//! Inbound façade.

use std::sync::Arc;

use serde_json::json;

use crate::api::core::ApiCore;
use crate::api::endpoint::Endpoint;
use crate::api::error::ApiResult;
use crate::api::session::Session;
use crate::models::Inbound;

const INBOUNDS: &str = "panel/api/inbounds";

/// Operations on inbound listeners.
#[derive(Debug, Clone)]
pub struct InboundApi {
    core: Arc<ApiCore>,
}

impl InboundApi {
    pub fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    /// Current session as seen by this façade.
    pub fn session(&self) -> Option<Session> {
        self.core.session()
    }

    /// All inbounds with their settings and client traffic.
    pub async fn list(&self) -> ApiResult<Vec<Inbound>> {
        tracing::info!("Getting inbounds");
        let envelope = self.core.get(&Endpoint::get(INBOUNDS).segment("list")).await?;
        Ok(envelope.into_optional_obj()?.unwrap_or_default())
    }

    pub async fn get_by_id(&self, inbound_id: i64) -> ApiResult<Inbound> {
        tracing::info!(inbound_id, "Getting inbound");
        let envelope = self
            .core
            .get(&Endpoint::get(INBOUNDS).segment("get").param(inbound_id))
            .await?;
        envelope.into_obj()
    }

    pub async fn add(&self, inbound: &Inbound) -> ApiResult<()> {
        tracing::info!(port = inbound.port, protocol = %inbound.protocol, remark = %inbound.remark, "Adding inbound");
        let payload = payload(inbound)?;
        self.core.post(&Endpoint::post(INBOUNDS).segment("add"), payload).await?;
        tracing::info!("Inbound added");
        Ok(())
    }

    pub async fn update(&self, inbound_id: i64, inbound: &Inbound) -> ApiResult<()> {
        tracing::info!(inbound_id, "Updating inbound");
        let payload = payload(inbound)?;
        self.core
            .post(&Endpoint::post(INBOUNDS).segment("update").param(inbound_id), payload)
            .await?;
        tracing::info!(inbound_id, "Inbound updated");
        Ok(())
    }

    pub async fn delete(&self, inbound_id: i64) -> ApiResult<()> {
        tracing::info!(inbound_id, "Deleting inbound");
        self.core
            .post(&Endpoint::post(INBOUNDS).segment("del").param(inbound_id), json!({}))
            .await?;
        tracing::info!(inbound_id, "Inbound deleted");
        Ok(())
    }

    /// Reset traffic counters of every inbound.
    pub async fn reset_stats(&self) -> ApiResult<()> {
        tracing::info!("Resetting traffic of all inbounds");
        self.core
            .post(&Endpoint::post(INBOUNDS).segment("resetAllTraffics"), json!({}))
            .await?;
        Ok(())
    }

    /// Reset traffic counters of every client of one inbound.
    pub async fn reset_client_stats(&self, inbound_id: i64) -> ApiResult<()> {
        tracing::info!(inbound_id, "Resetting client traffic of inbound");
        self.core
            .post(
                &Endpoint::post(INBOUNDS).segment("resetAllClientTraffics").param(inbound_id),
                json!({}),
            )
            .await?;
        Ok(())
    }
}

fn payload(inbound: &Inbound) -> ApiResult<serde_json::Value> {
    Ok(inbound.to_payload()?)
}
