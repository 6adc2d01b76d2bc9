//! Identity provider client (self-service login flows, session whoami, logout).

use authgate_types::{AuthResponse, Session};
use reqwest::header::ACCEPT;
use serde::Deserialize;

use super::shared::{ClientError, decode_json, ensure_ok, parse_url, send};
use crate::browser::BrowserContext;

/// Session introspection endpoint.
pub const WHOAMI_PATH: &str = "/sessions/whoami";
/// Login flow lookup endpoint (`?id=<flow>`).
pub const LOGIN_FLOW_PATH: &str = "/self-service/login/flows";

/// Login flow as returned by the provider; only the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderLoginFlow {
    pub id: String,
    #[serde(default)]
    pub oauth2_login_challenge: Option<String>,
    #[serde(default)]
    pub ui: FlowUi,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlowUi {
    #[serde(default)]
    pub nodes: Vec<UiNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiNode {
    #[serde(default)]
    pub attributes: NodeAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl NodeAttributes {
    pub fn string_value(&self) -> Option<&str> {
        self.value.as_ref().and_then(serde_json::Value::as_str)
    }
}

/// Identity provider HTTP client.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    base_url: String,
    http: reqwest::Client,
}

impl ProviderClient {
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

    /// Introspects the browser's provider session.
    ///
    /// # Errors
    /// Any transport failure, non-200 status or undecodable body.
    pub async fn whoami(&self, ctx: &BrowserContext) -> Result<Session, ClientError> {
        let url = format!("{}{WHOAMI_PATH}", self.base_url);
        let request = ctx.attach(self.http.get(&url).header(ACCEPT, "application/json"));
        let response = ensure_ok(send(request, &url).await?, &url)?;
        decode_json(response, &url).await
    }

    /// Fetches a hosted login flow by id.
    ///
    /// # Errors
    /// Any transport failure, non-200 status or undecodable body.
    pub async fn login_flow(
        &self,
        flow_id: &str,
        ctx: &BrowserContext,
    ) -> Result<ProviderLoginFlow, ClientError> {
        let mut url = parse_url(&format!("{}{LOGIN_FLOW_PATH}", self.base_url))?;
        url.query_pairs_mut().append_pair("id", flow_id);
        let url = url.to_string();

        let request = ctx.attach(self.http.get(&url).header(ACCEPT, "application/json"));
        let response = ensure_ok(send(request, &url).await?, &url)?;
        decode_json(response, &url).await
    }

    /// Follows the logout redirect handed out by the backend.
    ///
    /// Relative targets resolve against the provider base URL. Cookies are
    /// only forwarded when the target is on the provider's origin.
    ///
    /// # Errors
    /// Any transport failure, non-200 status or undecodable body.
    pub async fn follow_logout(
        &self,
        target: &str,
        ctx: &BrowserContext,
    ) -> Result<AuthResponse, ClientError> {
        let base = parse_url(&self.base_url)?;
        let url = match url::Url::parse(target) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                base.join(target).map_err(|source| ClientError::InvalidUrl {
                    url: target.to_string(),
                    source,
                })?
            }
            Err(source) => {
                return Err(ClientError::InvalidUrl {
                    url: target.to_string(),
                    source,
                });
            }
        };

        let same_origin = url.origin() == base.origin();
        let url = url.to_string();
        let mut request = self.http.get(&url).header(ACCEPT, "application/json");
        if same_origin {
            request = ctx.attach(request);
        }
        let response = ensure_ok(send(request, &url).await?, &url)?;
        decode_json(response, &url).await
    }
}
