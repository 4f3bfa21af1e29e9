//! End-to-end tests against the in-process mock panel.

use std::sync::Arc;

use serde_json::json;
use xui_client::api::ApiError;
use xui_client::models::{Client, Inbound, Sniffing, StreamSettings};
use xui_client::net::{ReqwestTransport, TlsMode};
use xui_client::{Credentials, Session, XuiApi, XuiConfig};

mod common;
use common::{MockPanel, MockResponse};

async fn logged_in(panel: &MockPanel) -> XuiApi {
    panel.accept_login("3x-ui", "abc123");
    let api = XuiApi::new(panel.config()).unwrap();
    api.login().await.unwrap();
    api
}

#[tokio::test]
async fn test_login_and_session_cookie() {
    let panel = MockPanel::start().await;
    panel.accept_login("session", "abc123");
    panel.respond("/panel/api/inbounds/list", MockResponse::json(json!({"success": true, "obj": []})));

    let api = XuiApi::new(panel.config()).unwrap();
    let session = api.login().await.unwrap();
    assert_eq!(session.value(), "abc123");
    assert_eq!(session.name(), Some("session"));

    assert!(api.inbound().list().await.unwrap().is_empty());

    let login = &panel.requests_to("/login")[0];
    assert_eq!(login.method, "POST");
    assert_eq!(login.body, Some(json!({"username": "admin", "password": "admin"})));
    assert!(login.cookie.is_none());

    let list = &panel.requests_to("/panel/api/inbounds/list")[0];
    assert_eq!(list.method, "GET");
    assert_eq!(list.cookie.as_deref(), Some("session=abc123"));
    assert_eq!(list.accept.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_login_with_token_and_two_factor() {
    let panel = MockPanel::start().await;
    panel.accept_login("3x-ui", "xyz");

    let mut config = panel.config();
    config.panel.token = Some("secret-token".into());
    let api = XuiApi::new(config).unwrap();
    api.login().await.unwrap();
    api.login_with(&Credentials::new("root", "pw").with_two_factor_code("123456"))
        .await
        .unwrap();

    let logins = panel.requests_to("/login");
    assert_eq!(logins[0].body.as_ref().unwrap()["loginSecret"], "secret-token");
    assert_eq!(logins[1].body.as_ref().unwrap()["username"], "root");
    assert_eq!(logins[1].body.as_ref().unwrap()["twoFactorCode"], "123456");
}

#[tokio::test]
async fn test_login_without_cookie_is_authentication_error() {
    let panel = MockPanel::start().await;
    panel.respond("/login", MockResponse::json(json!({"success": true, "msg": ""})));

    let api = XuiApi::new(panel.config()).unwrap();
    let err = api.login().await.unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));
    assert!(api.session().is_none());
}

#[tokio::test]
async fn test_wrong_password() {
    let panel = MockPanel::start().await;
    panel.respond(
        "/login",
        MockResponse::json(json!({"success": false, "msg": "Invalid username or password"})),
    );

    let api = XuiApi::new(panel.config()).unwrap();
    let err = api.login().await.unwrap_err();
    assert_eq!(err.remote_message(), Some("Invalid username or password"));
}

#[tokio::test]
async fn test_requests_before_login_never_reach_panel() {
    let panel = MockPanel::start().await;
    let api = XuiApi::new(panel.config()).unwrap();

    let err = api.client().get_ips("alice").await.unwrap_err();
    assert!(matches!(err, ApiError::NotLoggedIn { .. }));
    assert!(panel.requests().is_empty());
}

#[tokio::test]
async fn test_assigned_session_is_sent_under_both_names() {
    let panel = MockPanel::start().await;
    panel.respond("/panel/api/inbounds/onlines", MockResponse::json(json!({"success": true, "obj": null})));

    let api = XuiApi::new(panel.config()).unwrap();
    api.set_session(Some(Session::from_value("restored")));
    assert!(api.client().online().await.unwrap().is_empty());

    let request = &panel.requests_to("/panel/api/inbounds/onlines")[0];
    assert_eq!(request.cookie.as_deref(), Some("session=restored; 3x-ui=restored"));
    assert_eq!(request.body, Some(json!({})));
}

#[tokio::test]
async fn test_inbound_lifecycle() {
    let panel = MockPanel::start().await;
    let api = logged_in(&panel).await;

    panel.respond("/panel/api/inbounds/add", MockResponse::json(json!({"success": true, "msg": "Create Successfully"})));
    panel.respond(
        "/panel/api/inbounds/get/5",
        MockResponse::json(json!({
            "success": true,
            "obj": {
                "id": 5, "enable": true, "port": 8443, "protocol": "vless", "remark": "edge",
                "settings": "{\"clients\":[{\"id\":\"uuid-1\",\"email\":\"alice\",\"enable\":true}],\"decryption\":\"none\"}",
                "streamSettings": "{\"network\":\"tcp\",\"security\":\"reality\"}",
                "sniffing": "{\"enabled\":true,\"destOverride\":[\"http\",\"tls\"]}",
                "clientStats": null
            }
        })),
    );
    panel.respond("/panel/api/inbounds/del/5", MockResponse::json(json!({"success": true})));

    let mut inbound = Inbound::new(8443, "vless");
    inbound.remark = "edge".into();
    inbound.stream_settings = StreamSettings::new("reality", "tcp");
    inbound.sniffing = Sniffing::enabled();
    api.inbound().add(&inbound).await.unwrap();

    let fetched = api.inbound().get_by_id(5).await.unwrap();
    assert_eq!(fetched.remark, "edge");
    assert_eq!(fetched.stream_settings.security, "reality");
    assert_eq!(fetched.find_client("alice").unwrap().id.to_string(), "uuid-1");

    api.inbound().delete(5).await.unwrap();

    let add = &panel.requests_to("/panel/api/inbounds/add")[0];
    let body = add.body.as_ref().unwrap();
    assert_eq!(body["port"], 8443);
    let stream: serde_json::Value =
        serde_json::from_str(body["streamSettings"].as_str().unwrap()).unwrap();
    assert_eq!(stream["security"], "reality");
}

#[tokio::test]
async fn test_delete_failure_is_remote_error() {
    let panel = MockPanel::start().await;
    let api = logged_in(&panel).await;
    panel.respond(
        "/panel/api/inbounds/del/9",
        MockResponse::json(json!({"success": false, "msg": "Delete Failed: record not found"})),
    );

    let err = api.inbound().delete(9).await.unwrap_err();
    assert!(matches!(err, ApiError::Remote { .. }));
    assert_eq!(err.remote_message(), Some("Delete Failed: record not found"));
}

#[tokio::test]
async fn test_client_operations() {
    let panel = MockPanel::start().await;
    let api = logged_in(&panel).await;

    panel.respond("/panel/api/inbounds/addClient", MockResponse::json(json!({"success": true})));
    panel.respond(
        "/panel/api/inbounds/clientIps/alice",
        MockResponse::json(json!({"success": true, "obj": "No IP Record"})),
    );
    panel.respond(
        "/panel/api/inbounds/getClientTraffics/alice",
        MockResponse::json(json!({
            "success": true,
            "obj": {"id": 7, "inboundId": 1, "enable": true, "email": "alice", "up": 1, "down": 2, "total": 0}
        })),
    );
    panel.respond(
        "/panel/api/inbounds/getClientTraffics/ghost",
        MockResponse::json(json!({"success": true, "obj": null})),
    );
    panel.respond("/panel/api/inbounds/1/delClient/uuid-1", MockResponse::json(json!({"success": true})));

    api.client()
        .add(1, &[Client::new("alice").with_id("uuid-1").with_total_gb(1 << 30)])
        .await
        .unwrap();
    assert!(api.client().get_ips("alice").await.unwrap().is_empty());

    let traffic = api.client().get_by_email("alice").await.unwrap().unwrap();
    assert_eq!(traffic.used_traffic(), 3);
    assert!(api.client().get_by_email("ghost").await.unwrap().is_none());

    panel.respond("/panel/api/inbounds/updateClient/uuid-1", MockResponse::json(json!({"success": true})));
    let rotated = Client::new("alice").with_id("uuid-2").with_inbound_id(1);
    api.client().update("uuid-1", &rotated).await.unwrap();

    api.client().delete(1, "uuid-1").await.unwrap();

    let update = &panel.requests_to("/panel/api/inbounds/updateClient/uuid-1")[0];
    let settings: serde_json::Value =
        serde_json::from_str(update.body.as_ref().unwrap()["settings"].as_str().unwrap()).unwrap();
    assert_eq!(settings["clients"][0]["id"], "uuid-2");

    let add = &panel.requests_to("/panel/api/inbounds/addClient")[0];
    let body = add.body.as_ref().unwrap();
    assert_eq!(body["id"], 1);
    let settings: serde_json::Value = serde_json::from_str(body["settings"].as_str().unwrap()).unwrap();
    assert_eq!(settings["clients"][0]["totalGB"], 1 << 30);
    assert!(settings["clients"][0].get("flow").is_none());
}

#[tokio::test]
async fn test_server_status_and_backup() {
    let panel = MockPanel::start().await;
    let api = logged_in(&panel).await;

    panel.respond(
        "/panel/api/server/status",
        MockResponse::json(json!({
            "success": true,
            "obj": {
                "cpu": 5.2, "cpuCores": 2, "logicalPro": 4, "cpuSpeedMhz": 3000.0,
                "mem": {"current": 1024000, "total": 8192000},
                "swap": {"current": 0, "total": 0},
                "disk": {"current": 1, "total": 2},
                "xray": {"state": "running", "errorMsg": "", "version": "1.8.4"},
                "uptime": 60, "loads": [0.1, 0.2, 0.3], "tcpCount": 3, "udpCount": 1,
                "netIO": {"up": 1, "down": 2}, "netTraffic": {"sent": 3, "recv": 4},
                "publicIP": {"ipv4": "203.0.113.1", "ipv6": "N/A"},
                "appStats": {"threads": 9, "mem": 100, "uptime": 60}
            }
        })),
    );
    panel.respond("/server/getDb", MockResponse::bytes(b"SQLite format 3\0backup"));
    panel.respond("/panel/api/inbounds/createbackup", MockResponse::bytes(b""));

    let status = api.server().get_status().await.unwrap();
    assert_eq!(status.cpu, 5.2);
    assert_eq!(status.mem.current, 1024000);
    assert_eq!(status.public_ip.ipv4, "203.0.113.1");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x-ui.db");
    api.server().get_db(&path).await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"SQLite format 3\0backup");

    let download = &panel.requests_to("/server/getDb")[0];
    assert_eq!(download.accept.as_deref(), Some("application/octet-stream"));

    api.database().export().await.unwrap();
    assert_eq!(panel.requests_to("/panel/api/inbounds/createbackup").len(), 1);
}

#[tokio::test]
async fn test_http_error_status_is_not_retried() {
    let panel = MockPanel::start().await;
    let api = logged_in(&panel).await;
    panel.respond("/panel/api/inbounds/list", MockResponse::status(500));

    let err = api.inbound().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(panel.requests_to("/panel/api/inbounds/list").len(), 1);
}

#[tokio::test]
async fn test_html_body_is_malformed() {
    let panel = MockPanel::start().await;
    let api = logged_in(&panel).await;
    panel.respond("/panel/api/inbounds/list", MockResponse::bytes(b"<html>login</html>"));

    let err = api.inbound().list().await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreachable_panel_exhausts_retries() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = XuiConfig::new(format!("http://{}", addr), "admin", "admin");
    config.retries.backoff_unit_ms = 1;
    let transport = Arc::new(ReqwestTransport::new(TlsMode::System, std::time::Duration::from_secs(2)).unwrap());
    let api = XuiApi::with_transport(config, transport).unwrap();

    let err = api.login().await.unwrap_err();
    assert!(
        matches!(err, ApiError::RetryExhausted { attempts: 3, .. }),
        "unexpected error: {err}"
    );
}
