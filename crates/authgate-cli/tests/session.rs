//! Integration tests for the authenticated-area session and logout.

mod support;

use support::{BROWSER_URL, authgate, can_bind_localhost, json_stdout};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_current_user(server: &MockServer, password_reset: bool) {
    Mock::given(method("GET"))
        .and(path("/api/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": 1, "role": "Admin", "password_reset": password_reset }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_session_renders_children_for_user() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    mount_current_user(&server, false).await;

    let out = json_stdout(authgate(&server, &home).args(["--path", "/dashboard", "session"]));
    assert_eq!(out["render"], "children");
    assert_eq!(out["user"]["id"], 1);
    assert_eq!(out["user"]["role"], "Admin");
    assert_eq!(out["navigations"], serde_json::json!([]));
}

#[tokio::test]
async fn test_session_password_reset_redirects() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    mount_current_user(&server, true).await;

    let out = json_stdout(authgate(&server, &home).args(["session", "--path", "/dashboard"]));
    assert_eq!(out["render"], "nothing");
    assert_eq!(out["user"], serde_json::Value::Null);
    assert_eq!(
        out["navigations"],
        serde_json::json!([{ "kind": "assign", "url": "/reset-password" }])
    );
}

#[tokio::test]
async fn test_logout_follows_provider_redirect() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "redirect_to": format!("{}/self-service/logout", server.uri()) }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/self-service/logout"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "logout_url": "https://idp/done" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let out = json_stdout(authgate(&server, &home).arg("logout"));
    assert_eq!(
        out,
        serde_json::json!({ "kind": "replace", "url": "https://idp/done" })
    );
}

#[tokio::test]
async fn test_logout_backend_failure_falls_back() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let out = json_stdout(authgate(&server, &home).arg("logout"));
    assert_eq!(out, serde_json::json!({ "kind": "assign", "url": BROWSER_URL }));
}

#[tokio::test]
async fn test_facility_prints_default_facility() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/facilities/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": 1, "name": "Main", "timezone": "America/Chicago" }
        })))
        .mount(&server)
        .await;

    let out = json_stdout(authgate(&server, &home).arg("facility"));
    assert_eq!(out["name"], "Main");
}
