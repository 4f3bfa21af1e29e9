//! Blocking binding.
//!
//! Mirrors [`crate::api::XuiApi`] method for method. Every call drives the
//! same engine on a current-thread tokio runtime owned by the client, so the
//! retry, session and validation behavior is identical. Calling from inside
//! an async runtime panics; use the async API there.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::api::{self, ApiResult, Credentials, Session};
use crate::config::XuiConfig;
use crate::models::{Client, Inbound, ServerStatus};
use crate::net::Transport;

#[derive(Debug, Clone)]
struct Executor {
    runtime: Arc<Runtime>,
}

impl Executor {
    fn new() -> ApiResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Blocking client for one panel.
#[derive(Debug, Clone)]
pub struct XuiApi {
    inner: api::XuiApi,
    executor: Executor,
}

impl XuiApi {
    pub fn new(config: XuiConfig) -> ApiResult<Self> {
        Ok(Self {
            inner: api::XuiApi::new(config)?,
            executor: Executor::new()?,
        })
    }

    pub fn with_transport(config: XuiConfig, transport: Arc<dyn Transport>) -> ApiResult<Self> {
        Ok(Self {
            inner: api::XuiApi::with_transport(config, transport)?,
            executor: Executor::new()?,
        })
    }

    pub fn inbound(&self) -> InboundApi<'_> {
        InboundApi {
            inner: self.inner.inbound(),
            executor: &self.executor,
        }
    }

    pub fn client(&self) -> ClientApi<'_> {
        ClientApi {
            inner: self.inner.client(),
            executor: &self.executor,
        }
    }

    pub fn server(&self) -> ServerApi<'_> {
        ServerApi {
            inner: self.inner.server(),
            executor: &self.executor,
        }
    }

    pub fn database(&self) -> DatabaseApi<'_> {
        DatabaseApi {
            inner: self.inner.database(),
            executor: &self.executor,
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.session()
    }

    pub fn set_session(&self, session: Option<Session>) {
        self.inner.set_session(session);
    }

    pub fn login(&self) -> ApiResult<Session> {
        self.executor.block_on(self.inner.login())
    }

    pub fn login_with(&self, credentials: &Credentials) -> ApiResult<Session> {
        self.executor.block_on(self.inner.login_with(credentials))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InboundApi<'a> {
    inner: &'a api::InboundApi,
    executor: &'a Executor,
}

impl InboundApi<'_> {
    pub fn session(&self) -> Option<Session> {
        self.inner.session()
    }

    pub fn list(&self) -> ApiResult<Vec<Inbound>> {
        self.executor.block_on(self.inner.list())
    }

    pub fn get_by_id(&self, inbound_id: i64) -> ApiResult<Inbound> {
        self.executor.block_on(self.inner.get_by_id(inbound_id))
    }

    pub fn add(&self, inbound: &Inbound) -> ApiResult<()> {
        self.executor.block_on(self.inner.add(inbound))
    }

    pub fn update(&self, inbound_id: i64, inbound: &Inbound) -> ApiResult<()> {
        self.executor.block_on(self.inner.update(inbound_id, inbound))
    }

    pub fn delete(&self, inbound_id: i64) -> ApiResult<()> {
        self.executor.block_on(self.inner.delete(inbound_id))
    }

    pub fn reset_stats(&self) -> ApiResult<()> {
        self.executor.block_on(self.inner.reset_stats())
    }

    pub fn reset_client_stats(&self, inbound_id: i64) -> ApiResult<()> {
        self.executor.block_on(self.inner.reset_client_stats(inbound_id))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClientApi<'a> {
    inner: &'a api::ClientApi,
    executor: &'a Executor,
}

impl ClientApi<'_> {
    pub fn session(&self) -> Option<Session> {
        self.inner.session()
    }

    pub fn get_by_email(&self, email: &str) -> ApiResult<Option<Client>> {
        self.executor.block_on(self.inner.get_by_email(email))
    }

    pub fn get_ips(&self, email: &str) -> ApiResult<Vec<String>> {
        self.executor.block_on(self.inner.get_ips(email))
    }

    pub fn add(&self, inbound_id: i64, clients: &[Client]) -> ApiResult<()> {
        self.executor.block_on(self.inner.add(inbound_id, clients))
    }

    pub fn update(&self, client_uuid: &str, client: &Client) -> ApiResult<()> {
        self.executor.block_on(self.inner.update(client_uuid, client))
    }

    pub fn reset_ips(&self, email: &str) -> ApiResult<()> {
        self.executor.block_on(self.inner.reset_ips(email))
    }

    pub fn reset_stats(&self, inbound_id: i64, email: &str) -> ApiResult<()> {
        self.executor.block_on(self.inner.reset_stats(inbound_id, email))
    }

    pub fn delete(&self, inbound_id: i64, client_uuid: &str) -> ApiResult<()> {
        self.executor.block_on(self.inner.delete(inbound_id, client_uuid))
    }

    pub fn delete_depleted(&self, inbound_id: i64) -> ApiResult<()> {
        self.executor.block_on(self.inner.delete_depleted(inbound_id))
    }

    pub fn online(&self) -> ApiResult<Vec<String>> {
        self.executor.block_on(self.inner.online())
    }

    pub fn get_traffic_by_id(&self, client_uuid: &str) -> ApiResult<Vec<Client>> {
        self.executor.block_on(self.inner.get_traffic_by_id(client_uuid))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ServerApi<'a> {
    inner: &'a api::ServerApi,
    executor: &'a Executor,
}

impl ServerApi<'_> {
    pub fn session(&self) -> Option<Session> {
        self.inner.session()
    }

    pub fn get_status(&self) -> ApiResult<ServerStatus> {
        self.executor.block_on(self.inner.get_status())
    }

    pub fn download_db(&self) -> ApiResult<Vec<u8>> {
        self.executor.block_on(self.inner.download_db())
    }

    pub fn get_db(&self, path: impl AsRef<Path>) -> ApiResult<()> {
        self.executor.block_on(self.inner.get_db(path))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DatabaseApi<'a> {
    inner: &'a api::DatabaseApi,
    executor: &'a Executor,
}

impl DatabaseApi<'_> {
    pub fn session(&self) -> Option<Session> {
        self.inner.session()
    }

    pub fn export(&self) -> ApiResult<()> {
        self.executor.block_on(self.inner.export())
    }
}
