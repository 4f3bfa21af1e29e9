//! Database façade.

use std::sync::Arc;

use crate::api::core::ApiCore;
use crate::api::endpoint::Endpoint;
use crate::api::error::ApiResult;
use crate::api::session::Session;

#[derive(Debug, Clone)]
pub struct DatabaseApi {
    core: Arc<ApiCore>,
}

impl DatabaseApi {
    pub fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    pub fn session(&self) -> Option<Session> {
        self.core.session()
    }

    /// Ask the panel to create a backup and send it to the admins configured
    /// in its Telegram bot. Only the HTTP status is checked.
    pub async fn export(&self) -> ApiResult<()> {
        tracing::info!("Exporting database backup");
        self.core
            .download(&Endpoint::get("panel/api/inbounds/createbackup"))
            .await?;
        tracing::info!("Database backup requested");
        Ok(())
    }
}
