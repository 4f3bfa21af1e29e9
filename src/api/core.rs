//! Session-authenticated request engine.
//!
//! # Request Flow
//! ```text
//! façade builds Endpoint + payload
//!     → ApiCore::get/post/download
//!     → session gate (everything but login needs a session)
//!     → RetryPolicy::execute
//!         → with_deadline(Transport::send)  (one round trip)
//!         → HTTP status check              (4xx/5xx is fatal)
//!     → Envelope::validate                 (skipped for downloads)
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use url::Url;

use crate::api::endpoint::Endpoint;
use crate::api::envelope::Envelope;
use crate::api::error::{ApiError, ApiResult};
use crate::api::session::{Credentials, Session, SessionHandle, COOKIE_NAMES};
use crate::config::XuiConfig;
use crate::net::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;
use crate::resilience::{RetryError, RetryPolicy};

/// The engine shared by every façade.
pub struct ApiCore {
    base: Url,
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    request_timeout: Duration,
    session: SessionHandle,
}

impl ApiCore {
    pub fn new(
        host: &str,
        transport: Arc<dyn Transport>,
        retry: RetryPolicy,
        request_timeout: Duration,
    ) -> ApiResult<Self> {
        let base = Url::parse(host.trim().trim_end_matches('/'))
            .map_err(|_| ApiError::InvalidHost(host.to_string()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidHost(host.to_string()));
        }

        Ok(Self {
            base,
            transport,
            retry,
            request_timeout,
            session: SessionHandle::new(),
        })
    }

    /// Build an engine with the reqwest transport described by `config`.
    pub fn from_config(config: &XuiConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(
            config.tls.mode(),
            Duration::from_secs(config.timeouts.connect_secs),
        )?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build an engine from `config` around a caller-supplied transport.
    pub fn with_transport(config: &XuiConfig, transport: Arc<dyn Transport>) -> ApiResult<Self> {
        let retry = RetryPolicy::new(config.retries.max_attempts, config.retries.backoff_unit());
        Self::new(
            &config.panel.host,
            transport,
            retry,
            Duration::from_secs(config.timeouts.request_secs),
        )
    }

    /// Replace the retry policy (e.g., to inject a recording sleeper).
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn host(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn session_handle(&self) -> &SessionHandle {
        &self.session
    }

    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    pub fn set_session(&self, session: Option<Session>) {
        self.session.set(session);
    }

    /// Absolute URL for an endpoint.
    pub fn url(&self, endpoint: &Endpoint) -> ApiResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidHost(self.base.to_string()))?;
            segments.pop_if_empty();
            segments.extend(&endpoint.segments);
        }
        Ok(url)
    }

    /// Log in and store the issued session.
    ///
    /// Permitted in any state; a second login replaces the session.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        tracing::info!(username = %credentials.username, "Logging in");

        let result = self.login_inner(credentials).await;
        metrics::record_login(result.is_ok());

        let session = result?;
        tracing::info!(
            username = %credentials.username,
            cookie = session.name().unwrap_or("unknown"),
            "Session cookie retrieved"
        );
        self.session.set(Some(session.clone()));
        Ok(session)
    }

    async fn login_inner(&self, credentials: &Credentials) -> ApiResult<Session> {
        let response = self
            .execute(&Endpoint::login(), Some(credentials.to_body()))
            .await?;
        Envelope::validate(&response.body)?;

        extract_session(&response).ok_or_else(|| {
            ApiError::Authentication(
                "no session cookie found, something is wrong with the login".to_string(),
            )
        })
    }

    pub async fn get(&self, endpoint: &Endpoint) -> ApiResult<Envelope> {
        let response = self.execute(endpoint, None).await?;
        Envelope::validate(&response.body)
    }

    pub async fn post(&self, endpoint: &Endpoint, body: Value) -> ApiResult<Envelope> {
        let response = self.execute(endpoint, Some(body)).await?;
        Envelope::validate(&response.body)
    }

    /// Raw body after only the HTTP status check.
    pub async fn download(&self, endpoint: &Endpoint) -> ApiResult<Vec<u8>> {
        let response = self.execute(endpoint, None).await?;
        Ok(response.body)
    }

    /// Gate, retry and status-check one logical request.
    pub async fn execute(&self, endpoint: &Endpoint, body: Option<Value>) -> ApiResult<HttpResponse> {
        let start = Instant::now();

        let result = self.execute_inner(endpoint, body).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        metrics::record_request(endpoint.method.as_str(), endpoint.route(), outcome, start);
        result
    }

    async fn execute_inner(
        &self,
        endpoint: &Endpoint,
        body: Option<Value>,
    ) -> ApiResult<HttpResponse> {
        let session = self.session.get().filter(|s| !s.value().is_empty());
        if endpoint.requires_auth && session.is_none() {
            tracing::warn!(method = %endpoint.method, endpoint = %endpoint.path(), "Request attempted before login");
            return Err(ApiError::NotLoggedIn {
                method: endpoint.method,
            });
        }

        let url = self.url(endpoint)?.to_string();
        let mut request =
            HttpRequest::new(endpoint.method, url.clone()).header("Accept", endpoint.accept);
        if let Some(session) = &session {
            for (name, value) in session.cookies() {
                request = request.cookie(name, value);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(method = %endpoint.method, url = %url, "Sending request");

        let transport = &self.transport;
        let deadline = self.request_timeout;
        let result = self
            .retry
            .execute(endpoint.route(), |attempt| {
                let request = request.clone();
                async move {
                    let target = request.url.clone();
                    let response = with_deadline(deadline, transport.send(request)).await?;
                    if response.is_error() {
                        tracing::warn!(
                            url = %target,
                            attempt,
                            status = response.status,
                            "Panel returned error status"
                        );
                        return Err(ApiError::Status {
                            status: response.status,
                            url: target,
                            body: response.text(),
                        });
                    }
                    Ok(response)
                }
            })
            .await;

        match result {
            Ok(response) => Ok(response),
            Err(RetryError::Fatal(e)) => Err(e),
            Err(RetryError::Exhausted { attempts, last }) => Err(match last {
                ApiError::Transport(source) => ApiError::RetryExhausted {
                    attempts,
                    url,
                    source,
                },
                other => other,
            }),
            Err(RetryError::NoAttempts) => Err(ApiError::MaxRetriesExceeded { url }),
        }
    }
}

impl std::fmt::Debug for ApiCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCore")
            .field("host", &self.host())
            .field("retry", &self.retry)
            .field("request_timeout", &self.request_timeout)
            .field("session", &self.session)
            .finish()
    }
}

/// First non-empty session cookie among the known names.
fn extract_session(response: &HttpResponse) -> Option<Session> {
    COOKIE_NAMES.iter().find_map(|name| {
        response
            .cookie(name)
            .filter(|value| !value.is_empty())
            .map(|value| Session::new(*name, value))
    })
}
