//! Top-level client owning the engine and the four façades.

use std::sync::Arc;

use crate::api::client::ClientApi;
use crate::api::core::ApiCore;
use crate::api::database::DatabaseApi;
use crate::api::error::ApiResult;
use crate::api::inbound::InboundApi;
use crate::api::server::ServerApi;
use crate::api::session::{Credentials, Session};
use crate::config::XuiConfig;
use crate::net::Transport;

/// Async client for one panel.
///
/// ```no_run
/// # async fn run() -> xui_client::ApiResult<()> {
/// use xui_client::{XuiApi, XuiConfig};
///
/// let api = XuiApi::new(XuiConfig::new("http://localhost:2053", "admin", "admin"))?;
/// api.login().await?;
/// for inbound in api.inbound().list().await? {
///     println!("{} {}", inbound.port, inbound.remark);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct XuiApi {
    core: Arc<ApiCore>,
    credentials: Credentials,
    inbound: InboundApi,
    client: ClientApi,
    server: ServerApi,
    database: DatabaseApi,
}

impl XuiApi {
    /// Client over the reqwest transport described by `config`.
    pub fn new(config: XuiConfig) -> ApiResult<Self> {
        let core = ApiCore::from_config(&config)?;
        Ok(Self::from_core(core, config.credentials()))
    }

    /// Client over a caller-supplied transport.
    pub fn with_transport(config: XuiConfig, transport: Arc<dyn Transport>) -> ApiResult<Self> {
        let core = ApiCore::with_transport(&config, transport)?;
        Ok(Self::from_core(core, config.credentials()))
    }

    pub fn from_core(core: ApiCore, credentials: Credentials) -> Self {
        let core = Arc::new(core);
        Self {
            inbound: InboundApi::new(core.clone()),
            client: ClientApi::new(core.clone()),
            server: ServerApi::new(core.clone()),
            database: DatabaseApi::new(core.clone()),
            core,
            credentials,
        }
    }

    pub fn inbound(&self) -> &InboundApi {
        &self.inbound
    }

    pub fn client(&self) -> &ClientApi {
        &self.client
    }

    pub fn server(&self) -> &ServerApi {
        &self.server
    }

    pub fn database(&self) -> &DatabaseApi {
        &self.database
    }

    pub fn core(&self) -> &ApiCore {
        &self.core
    }

    pub fn session(&self) -> Option<Session> {
        self.core.session()
    }

    /// Assign a session obtained elsewhere; every façade sees it immediately.
    pub fn set_session(&self, session: Option<Session>) {
        self.core.set_session(session);
    }

    /// Log in with the configured credentials.
    pub async fn login(&self) -> ApiResult<Session> {
        self.core.login(&self.credentials).await
    }

    /// Log in with explicit credentials, replacing the current session.
    pub async fn login_with(&self, credentials: &Credentials) -> ApiResult<Session> {
        self.core.login(credentials).await
    }
}
