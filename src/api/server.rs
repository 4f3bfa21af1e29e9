//! Server façade: host status and database backup download.

use std::path::Path;
use std::sync::Arc;

use crate::api::core::ApiCore;
use crate::api::endpoint::{Endpoint, ACCEPT_BINARY};
use crate::api::error::ApiResult;
use crate::api::session::Session;
use crate::models::ServerStatus;

#[derive(Debug, Clone)]
pub struct ServerApi {
    core: Arc<ApiCore>,
}

impl ServerApi {
    pub fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    pub fn session(&self) -> Option<Session> {
        self.core.session()
    }

    pub async fn get_status(&self) -> ApiResult<ServerStatus> {
        tracing::info!("Getting server status");
        let envelope = self.core.get(&Endpoint::get("panel/api/server/status")).await?;
        envelope.into_obj()
    }

    /// Raw SQLite database of the panel. The body is not an envelope.
    pub async fn download_db(&self) -> ApiResult<Vec<u8>> {
        tracing::info!("Downloading panel database");
        let bytes = self
            .core
            .download(&Endpoint::get("server/getDb").accept(ACCEPT_BINARY))
            .await?;
        tracing::info!(bytes = bytes.len(), "Panel database downloaded");
        Ok(bytes)
    }

    /// Download the database and write it to `path`, replacing any existing file.
    pub async fn get_db(&self, path: impl AsRef<Path>) -> ApiResult<()> {
        let path = path.as_ref();
        let bytes = self.download_db().await?;
        tokio::fs::write(path, &bytes).await?;
        tracing::info!(path = %path.display(), "Panel database saved");
        Ok(())
    }
}
