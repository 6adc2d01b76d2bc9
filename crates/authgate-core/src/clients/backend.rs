//! Application backend client.
//!
//! Every payload comes wrapped in `ApiEnvelope`; a call succeeds when the
//! status is 2xx and the envelope decodes.

use authgate_types::{ApiEnvelope, AuthResponse, Facility, RefreshRequest, User};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::shared::{ClientError, decode_json, ensure_success, send};
use crate::browser::BrowserContext;

pub const REFRESH_PATH: &str = "/auth/refresh";
pub const CURRENT_USER_PATH: &str = "/auth";
pub const LOGOUT_PATH: &str = "/logout";
pub const FACILITIES_PATH: &str = "/facilities";

/// Backend HTTP client.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// `base_url` must not end with a slash (see `Endpoints`).
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchanges an active provider session for an application redirect.
    ///
    /// # Errors
    /// Any transport failure, non-2xx status or undecodable body.
    pub async fn refresh(
        &self,
        body: &RefreshRequest,
        ctx: &BrowserContext,
    ) -> Result<AuthResponse, ClientError> {
        let url = format!("{}{REFRESH_PATH}", self.base_url);
        let request = ctx.attach(self.http.post(&url).json(body));
        self.unwrap_envelope(request, &url).await
    }

    /// Fetches the signed-in user.
    ///
    /// `401`/`403` and a `null` payload mean "nobody is signed in".
    ///
    /// # Errors
    /// Transport failures, other non-2xx statuses and undecodable bodies.
    pub async fn current_user(&self, ctx: &BrowserContext) -> Result<Option<User>, ClientError> {
        let url = format!("{}{CURRENT_USER_PATH}", self.base_url);
        let request = ctx.attach(self.http.get(&url));
        match self.unwrap_envelope(request, &url).await {
            Ok(user) => Ok(user),
            Err(ClientError::Status { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Invalidates the backend session.
    ///
    /// # Errors
    /// Any transport failure, non-2xx status or undecodable body.
    pub async fn logout(&self, ctx: &BrowserContext) -> Result<AuthResponse, ClientError> {
        let url = format!("{}{LOGOUT_PATH}", self.base_url);
        let request = ctx.attach(self.http.post(&url).json(&serde_json::json!({})));
        self.unwrap_envelope(request, &url).await
    }

    /// Fetches a facility by id; `null` payloads map to `None`.
    ///
    /// # Errors
    /// Any transport failure, non-2xx status or undecodable body.
    pub async fn facility(
        &self,
        id: i64,
        ctx: &BrowserContext,
    ) -> Result<Option<Facility>, ClientError> {
        let url = format!("{}{FACILITIES_PATH}/{id}", self.base_url);
        let request = ctx.attach(self.http.get(&url));
        self.unwrap_envelope(request, &url).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, ClientError> {
        let response = ensure_success(send(request, url).await?, url)?;
        let envelope: ApiEnvelope<T> = decode_json(response, url).await?;
        if let Some(message) = &envelope.message {
            tracing::trace!(%url, %message, "backend message");
        }
        Ok(envelope.data)
    }
}
