//! Hosted login flow initialization.
//!
//! Looks a flow up on the provider and extracts what the login form needs.
//! Failure is a value (`FlowInitError`); the all-empty payload only exists at
//! the route-loader boundary.

use authgate_types::LoginFlow;

use crate::browser::BrowserContext;
use crate::clients::provider::UiNode;
use crate::clients::{ClientError, ProviderClient, error_chain};

/// Name of the hidden input carrying the anti-forgery token.
pub const CSRF_NODE_NAME: &str = "csrf_token";

pub type FlowInit = Result<LoginFlow, FlowInitError>;

#[derive(Debug, thiserror::Error)]
pub enum FlowInitError {
    #[error("login flow id is empty")]
    EmptyFlowId,
    #[error("login flow lookup failed")]
    Lookup(#[from] ClientError),
    #[error("login flow {flow_id} has no CSRF token among {nodes} UI node(s)")]
    MissingCsrfToken { flow_id: String, nodes: usize },
    #[error("login flow lookup was cancelled")]
    Cancelled,
}

/// Fetches flow `flow_id` and extracts id, challenge and CSRF token.
///
/// Never fails the caller: every failure comes back as `Err` and is logged.
pub async fn initialize_flow(
    provider: &ProviderClient,
    flow_id: &str,
    ctx: &BrowserContext,
) -> FlowInit {
    let result = lookup(provider, flow_id, ctx).await;
    if let Err(err) = &result {
        tracing::warn!(flow_id, error = %error_chain(err), "Error initializing login flow");
    }
    result
}

async fn lookup(provider: &ProviderClient, flow_id: &str, ctx: &BrowserContext) -> FlowInit {
    if flow_id.trim().is_empty() {
        return Err(FlowInitError::EmptyFlowId);
    }

    let flow = provider.login_flow(flow_id, ctx).await?;
    let Some(csrf_token) = select_csrf_token(&flow.ui.nodes) else {
        return Err(FlowInitError::MissingCsrfToken {
            flow_id: flow.id,
            nodes: flow.ui.nodes.len(),
        });
    };
    let csrf_token = csrf_token.to_string();

    if flow.oauth2_login_challenge.is_none() {
        tracing::debug!(flow_id = %flow.id, "login flow carries no OAuth2 challenge");
    }

    Ok(LoginFlow {
        flow_id: flow.id,
        challenge: flow.oauth2_login_challenge.unwrap_or_default(),
        csrf_token,
    })
}

/// Picks the CSRF token out of the flow's UI nodes.
///
/// The node named `csrf_token` wins. Without one, a lone node is taken as the
/// token carrier; zero or several unnamed nodes yield `None`.
pub fn select_csrf_token(nodes: &[UiNode]) -> Option<&str> {
    if let Some(node) = nodes
        .iter()
        .find(|node| node.attributes.name.as_deref() == Some(CSRF_NODE_NAME))
    {
        return node.attributes.string_value();
    }

    match nodes {
        [only] => only.attributes.string_value(),
        _ => None,
    }
}
