//! Per-page-load login flow resolution.
//!
//! Decides, from the `flow` query parameter and the browser's cookies, whether
//! the login page should:
//! - redirect to the canonical entry URL (no flow in the URL),
//! - redirect silently because an existing provider session was refreshed, or
//! - render the hosted flow (or report that it could not be initialized).
//!
//! Network calls run strictly in sequence: whoami, flow lookup, refresh, and
//! a final flow lookup when the silent path does not produce a redirect.
//!
//! ## Cancellation
//!
//! `resolve_with_cancel` races every request against a `CancellationToken`.
//! Once the token fires no further request is issued and no redirect is
//! returned, so a page the user already left cannot trigger a refresh.

use std::future::Future;

use authgate_types::{AuthFlow, LoginFlow};
use tokio_util::sync::CancellationToken;

use super::initializer::{FlowInit, FlowInitError, initialize_flow};
use crate::browser::{BrowserContext, Navigation};
use crate::clients::{BackendClient, ProviderClient};
use crate::session::{refresh_request, refresh_session, validate_session};

/// Query parameter carrying the provider's login flow id.
pub const FLOW_QUERY_PARAM: &str = "flow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// The page was opened without a flow id.
    MissingFlow,
    /// An active provider session was exchanged for an application session.
    SessionRefreshed,
}

/// Outcome of resolving one login page load.
#[derive(Debug)]
pub enum FlowResolution {
    Redirect { to: String, reason: RedirectReason },
    Render(LoginFlow),
    /// The flow could not be initialized; the page has nothing to render.
    Unavailable(FlowInitError),
}

impl FlowResolution {
    pub fn is_redirect(&self) -> bool {
        matches!(self, FlowResolution::Redirect { .. })
    }

    /// The navigation the page must perform instead of rendering, if any.
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            FlowResolution::Redirect { to, .. } => Some(Navigation::Assign(to.clone())),
            _ => None,
        }
    }

    /// Converts to the route-loader JSON payload.
    ///
    /// `Unavailable` becomes the all-empty payload.
    pub fn into_auth_flow(self) -> AuthFlow {
        match self {
            FlowResolution::Redirect { to, .. } => AuthFlow::redirect(to),
            FlowResolution::Render(flow) => flow.into(),
            FlowResolution::Unavailable(_) => AuthFlow::sentinel(),
        }
    }
}

impl From<FlowInit> for FlowResolution {
    fn from(init: FlowInit) -> Self {
        match init {
            Ok(flow) => FlowResolution::Render(flow),
            Err(err) => FlowResolution::Unavailable(err),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("flow resolution was cancelled")]
    Cancelled,
}

/// Extracts the flow id from a page URL or a bare query string.
///
/// An empty `flow` value counts as missing.
pub fn flow_id_from_query(input: &str) -> Option<String> {
    let input = input.trim();
    let query = match url::Url::parse(input) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => {
            // A `?` only starts the query when no `key=` precedes it.
            let query = match input.find('?') {
                Some(at) if !input[..at].contains('=') => &input[at + 1..],
                _ => input,
            };
            query.split('#').next().unwrap_or_default().to_string()
        }
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == FLOW_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Orchestrates session validation, flow initialization and refresh.
#[derive(Debug, Clone, Copy)]
pub struct FlowResolver<'a> {
    provider: &'a ProviderClient,
    backend: &'a BackendClient,
    entry_url: &'a str,
}

impl<'a> FlowResolver<'a> {
    /// `entry_url` is where pages without a flow id are sent.
    pub fn new(
        provider: &'a ProviderClient,
        backend: &'a BackendClient,
        entry_url: &'a str,
    ) -> Self {
        Self {
            provider,
            backend,
            entry_url,
        }
    }

    /// Resolves a login page load to completion.
    pub async fn resolve(&self, page: &str, ctx: &BrowserContext) -> FlowResolution {
        let never = CancellationToken::new();
        uncancelled(self.resolve_with_cancel(page, ctx, &never).await)
    }

    /// Resolves a login page load, giving up as soon as `cancel` fires.
    ///
    /// # Errors
    /// `ResolveError::Cancelled` when the token fires before a decision.
    pub async fn resolve_with_cancel(
        &self,
        page: &str,
        ctx: &BrowserContext,
        cancel: &CancellationToken,
    ) -> Result<FlowResolution, ResolveError> {
        let Some(flow_id) = flow_id_from_query(page) else {
            tracing::info!(entry_url = %self.entry_url, "No login flow specified");
            return Ok(FlowResolution::Redirect {
                to: self.entry_url.to_string(),
                reason: RedirectReason::MissingFlow,
            });
        };

        if let Some(to) = self.try_silent_refresh(&flow_id, ctx, cancel).await? {
            tracing::info!(flow_id, redirect_to = %to, "Existing session refreshed");
            return Ok(FlowResolution::Redirect {
                to,
                reason: RedirectReason::SessionRefreshed,
            });
        }

        let init = guarded(cancel, initialize_flow(self.provider, &flow_id, ctx)).await?;
        Ok(init.into())
    }

    /// Returns the redirect target when the browser already holds an active
    /// provider session that the backend accepts. Every failure is `None`.
    async fn try_silent_refresh(
        &self,
        flow_id: &str,
        ctx: &BrowserContext,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, ResolveError> {
        let Some(session) = guarded(cancel, validate_session(self.provider, ctx)).await? else {
            return Ok(None);
        };
        let Some((identity, traits)) = session.active_identity() else {
            tracing::debug!(flow_id, "No active sessions found for this user");
            return Ok(None);
        };
        let (identity, username) = (identity.id.clone(), traits.username.clone());

        let flow = match guarded(cancel, initialize_flow(self.provider, flow_id, ctx)).await? {
            Ok(flow) => flow,
            Err(_) => return Ok(None),
        };

        let body = refresh_request(session, username, identity, flow.csrf_token, flow.challenge);
        let Ok(response) = guarded(cancel, refresh_session(self.backend, &body, ctx)).await? else {
            return Ok(None);
        };

        if response.redirect_to.is_empty() {
            tracing::warn!(flow_id, "Session refresh returned no redirect target");
            return Ok(None);
        }
        Ok(Some(response.redirect_to))
    }
}

/// Folds a cancellation into the "no usable flow" outcome.
fn uncancelled(result: Result<FlowResolution, ResolveError>) -> FlowResolution {
    match result {
        Ok(resolution) => resolution,
        Err(ResolveError::Cancelled) => FlowResolution::Unavailable(FlowInitError::Cancelled),
    }
}

/// Runs `fut` unless `cancel` fires first.
async fn guarded<F: Future>(cancel: &CancellationToken, fut: F) -> Result<F::Output, ResolveError> {
    if cancel.is_cancelled() {
        return Err(ResolveError::Cancelled);
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ResolveError::Cancelled),
        out = fut => Ok(out),
    }
}
