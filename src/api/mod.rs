//! Panel API subsystem.
//!
//! # Data Flow
//! ```text
//! XuiApi (xui.rs)
//!     → façade: inbound.rs / client.rs / server.rs / database.rs
//!     → core.rs (session gate, retry, status check)
//!     → envelope.rs (success flag, msg, obj)
//!     → typed result (models) | ApiError (error.rs)
//! ```
//!
//! # Design Decisions
//! - One `ApiCore` per client, shared by every façade through an `Arc`
//! - The session lives in a single `SessionHandle`; assigning it anywhere is
//!   visible everywhere
//! - Façades only build endpoints and payloads and decode `obj`

pub mod client;
pub mod core;
pub mod database;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod inbound;
pub mod server;
pub mod session;
pub mod xui;

pub use self::core::ApiCore;
pub use client::ClientApi;
pub use database::DatabaseApi;
pub use endpoint::Endpoint;
pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
pub use inbound::InboundApi;
pub use server::ServerApi;
pub use session::{Credentials, Session, SessionHandle};
pub use xui::XuiApi;

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::api::core::ApiCore;
    use crate::api::session::Session;
    use crate::net::{HttpRequest, HttpResponse, Transport, TransportError};
    use crate::resilience::retries::tests::RecordingSleeper;
    use crate::resilience::RetryPolicy;

    /// Replays canned outcomes in order and records every request.
    pub(crate) struct ScriptedTransport {
        script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new(script: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Request("script exhausted".into())))
        }
    }

    pub(crate) fn ok_json(body: Value) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            body: body.to_string().into_bytes(),
            ..HttpResponse::default()
        })
    }

    pub(crate) fn ok_bytes(body: &[u8]) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            body: body.to_vec(),
            ..HttpResponse::default()
        })
    }

    /// Engine over a scripted transport; retries never actually sleep.
    pub(crate) fn core_with(
        host: &str,
        script: Vec<Result<HttpResponse, TransportError>>,
    ) -> (ApiCore, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(script));
        let retry = RetryPolicy::new(3, Duration::from_secs(1))
            .with_sleeper(Arc::new(RecordingSleeper::default()));
        let core = ApiCore::new(host, transport.clone(), retry, Duration::from_secs(5))
            .expect("valid test host");
        (core, transport)
    }

    /// Shared engine at `http://panel` with a session already assigned.
    pub(crate) fn logged_in_core(
        script: Vec<Result<HttpResponse, TransportError>>,
    ) -> (Arc<ApiCore>, Arc<ScriptedTransport>) {
        let (core, transport) = core_with("http://panel", script);
        core.set_session(Some(Session::new("3x-ui", "abc123")));
        (Arc::new(core), transport)
    }
}
