//! Shared utilities for integration testing: an in-process mock panel.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;

use xui_client::XuiConfig;

/// A request as the mock panel saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub cookie: Option<String>,
    pub accept: Option<String>,
    pub body: Option<Value>,
}

/// A canned answer.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub set_cookie: Option<String>,
}

impl MockResponse {
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string().into_bytes(),
            set_cookie: None,
        }
    }

    pub fn bytes(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            set_cookie: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            set_cookie: None,
        }
    }

    pub fn with_cookie(mut self, cookie: &str) -> Self {
        self.set_cookie = Some(cookie.to_string());
        self
    }
}

#[derive(Default)]
struct PanelState {
    requests: Mutex<Vec<RecordedRequest>>,
    routes: Mutex<HashMap<String, VecDeque<MockResponse>>>,
}

/// Mock panel on an ephemeral port.
///
/// Responses are programmed per path. A queue with several entries is
/// consumed in order; the last entry keeps answering. Unknown paths get 404.
pub struct MockPanel {
    pub addr: SocketAddr,
    state: Arc<PanelState>,
}

impl MockPanel {
    pub async fn start() -> Self {
        let state = Arc::new(PanelState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client config pointing at this panel, with millisecond backoff.
    pub fn config(&self) -> XuiConfig {
        let mut config = XuiConfig::new(self.url(), "admin", "admin");
        config.retries.backoff_unit_ms = 1;
        config.timeouts.request_secs = 5;
        config
    }

    pub fn respond(&self, path: &str, response: MockResponse) {
        self.state
            .routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    /// Program a successful login issuing `cookie_name=value`.
    pub fn accept_login(&self, cookie_name: &str, value: &str) {
        self.respond(
            "/login",
            MockResponse::json(serde_json::json!({"success": true, "msg": "Login Successfully", "obj": null}))
                .with_cookie(&format!("{}={}; Path=/; HttpOnly", cookie_name, value)),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

async fn handle(
    State(state): State<Arc<PanelState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let path = uri.path().to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        cookie: header_value(header::COOKIE),
        accept: header_value(header::ACCEPT),
        body: serde_json::from_slice(&body).ok(),
    });

    let response = {
        let mut routes = state.routes.lock().unwrap();
        match routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
    };

    let Some(response) = response else {
        return Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("404 page not found"))
            .unwrap();
    };

    let mut builder = Response::builder()
        .status(response.status)
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8");
    if let Some(cookie) = &response.set_cookie {
        builder = builder.header(header::SET_COOKIE, cookie.as_str());
    }
    builder.body(Body::from(response.body)).unwrap()
}
