//! Shared helpers for integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;
use wiremock::MockServer;

pub const BROWSER_URL: &str = "https://app.example/";

pub fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// `authgate` pointed at `server` for both provider and backend (`/api`).
pub fn authgate(server: &MockServer, home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("authgate");
    cmd.env("AUTHGATE_HOME", home.path())
        .env("AUTHGATE_PROVIDER_URL", server.uri())
        .env("AUTHGATE_BACKEND_URL", format!("{}/api", server.uri()))
        .env("AUTHGATE_BROWSER_URL", BROWSER_URL)
        .env_remove("AUTHGATE_COOKIE")
        .env_remove("AUTHGATE_LOG");
    cmd
}

/// Runs `cmd`, asserts success and parses stdout as JSON.
pub fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}
