//! Integration tests for login flow resolution.

mod support;

use support::{BROWSER_URL, authgate, can_bind_localhost, json_stdout};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn flow_body() -> serde_json::Value {
    serde_json::json!({
        "id": "f1",
        "oauth2_login_challenge": "ch1",
        "ui": { "nodes": [
            { "attributes": { "name": "identifier", "value": "" } },
            { "attributes": { "name": "csrf_token", "value": "tok1" } }
        ] }
    })
}

#[tokio::test]
async fn test_resolve_without_flow_redirects_to_entry() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    let out = json_stdout(authgate(&server, &home).args(["resolve", "https://app.example/login"]));
    assert_eq!(
        out,
        serde_json::json!({
            "flow_id": "",
            "challenge": "",
            "csrf_token": "",
            "redirect_to": BROWSER_URL
        })
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resolve_inactive_session_renders_flow() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions/whoami"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "active": false })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/self-service/login/flows"))
        .and(query_param("id", "f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flow_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let out = json_stdout(authgate(&server, &home).args(["resolve", "?flow=f1"]));
    assert_eq!(
        out,
        serde_json::json!({ "flow_id": "f1", "challenge": "ch1", "csrf_token": "tok1" })
    );
}

#[tokio::test]
async fn test_resolve_active_session_redirects() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions/whoami"))
        .and(header("cookie", "ory_session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "active": true,
            "identity": { "id": "u1", "traits": { "username": "alice" } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/self-service/login/flows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flow_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "redirect_to": "/dashboard" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = json_stdout(
        authgate(&server, &home)
            .env("AUTHGATE_COOKIE", "ory_session=abc")
            .args(["resolve", "/login?flow=f1"]),
    );
    assert_eq!(out["redirect_to"], "/dashboard");
    assert_eq!(out["flow_id"], "");
}
