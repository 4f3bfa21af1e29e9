//! The blocking binding against the mock panel.

use serde_json::json;
use xui_client::api::ApiError;
use xui_client::blocking::XuiApi;

mod common;
use common::{MockPanel, MockResponse};

/// The mock panel needs a runtime of its own; the blocking client owns another.
fn start_panel() -> (tokio::runtime::Runtime, MockPanel) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let panel = runtime.block_on(MockPanel::start());
    (runtime, panel)
}

#[test]
fn test_blocking_round_trip() {
    let (_runtime, panel) = start_panel();
    panel.accept_login("3x-ui", "abc123");
    panel.respond(
        "/panel/api/inbounds/onlines",
        MockResponse::json(json!({"success": true, "obj": ["alice"]})),
    );
    panel.respond(
        "/panel/api/inbounds/clientIps/alice",
        MockResponse::json(json!({"success": true, "obj": "[\"198.51.100.7\"]"})),
    );
    panel.respond("/server/getDb", MockResponse::bytes(b"db"));

    let api = XuiApi::new(panel.config()).unwrap();
    api.login().unwrap();

    assert_eq!(api.client().online().unwrap(), vec!["alice"]);
    assert_eq!(api.client().get_ips("alice").unwrap(), vec!["198.51.100.7"]);
    assert_eq!(api.server().download_db().unwrap(), b"db");

    let expected = api.session();
    assert_eq!(api.inbound().session(), expected);
    assert_eq!(api.server().session(), expected);
}

#[test]
fn test_blocking_remote_failure() {
    let (_runtime, panel) = start_panel();
    panel.accept_login("session", "abc123");
    panel.respond(
        "/panel/api/inbounds/resetAllTraffics",
        MockResponse::json(json!({"success": false, "msg": "Something went wrong"})),
    );

    let api = XuiApi::new(panel.config()).unwrap();
    api.login().unwrap();

    let err = api.inbound().reset_stats().unwrap_err();
    assert!(matches!(err, ApiError::Remote { .. }));
    assert_eq!(err.remote_message(), Some("Something went wrong"));
}
