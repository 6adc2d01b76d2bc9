//! Request plumbing shared by the provider and backend clients.

use std::error::Error;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Failure of a single outbound call.
///
/// Callers in the flow logic branch on this value; it is never a panic.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid request URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("unexpected response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status for `Status` failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Builds the process-wide HTTP client.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if !timeout.is_zero() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

/// Sends a request, mapping transport failures.
pub(crate) async fn send(request: RequestBuilder, url: &str) -> Result<Response, ClientError> {
    tracing::debug!(%url, "sending request");
    request.send().await.map_err(|source| ClientError::Transport {
        url: url.to_string(),
        source,
    })
}

/// Rejects anything but exactly `200 OK`.
pub(crate) fn ensure_ok(response: Response, url: &str) -> Result<Response, ClientError> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(response)
    } else {
        Err(ClientError::Status {
            url: url.to_string(),
            status,
        })
    }
}

/// Rejects non-2xx responses.
pub(crate) fn ensure_success(response: Response, url: &str) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status {
            url: url.to_string(),
            status,
        })
    }
}

/// Reads the body and decodes it as JSON.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: Response,
    url: &str,
) -> Result<T, ClientError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}

pub(crate) fn parse_url(url: &str) -> Result<url::Url, ClientError> {
    url::Url::parse(url).map_err(|source| ClientError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// Renders an error and its sources as `outer: inner: root`.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
