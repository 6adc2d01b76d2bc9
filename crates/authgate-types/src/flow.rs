//! Login flow values.
//!
//! `LoginFlow` is the renderable result of looking up a hosted login flow.
//! `AuthFlow` is the JSON shape route loaders hand to the login page: either a
//! redirect instruction or a flow, with all-empty fields meaning "no flow".

use serde::{Deserialize, Serialize};

/// A hosted login flow that can be rendered as a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFlow {
    /// Provider-side flow identifier.
    pub flow_id: String,
    /// OAuth2 login challenge linking the flow to the upstream authorization request.
    pub challenge: String,
    /// Anti-forgery token required when submitting the flow.
    pub csrf_token: String,
}

/// Route-loader payload for the login page.
///
/// A populated `redirect_to` means "navigate instead of rendering".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFlow {
    #[serde(default)]
    pub flow_id: String,
    #[serde(default)]
    pub challenge: String,
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl AuthFlow {
    /// The "no usable flow" payload: every field empty, no redirect.
    pub fn sentinel() -> Self {
        Self::default()
    }

    /// A payload instructing the page to navigate to `url`.
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            redirect_to: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.redirect_to.is_none()
            && self.flow_id.is_empty()
            && self.challenge.is_empty()
            && self.csrf_token.is_empty()
    }

    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }
}

impl From<LoginFlow> for AuthFlow {
    fn from(flow: LoginFlow) -> Self {
        Self {
            flow_id: flow.flow_id,
            challenge: flow.challenge,
            csrf_token: flow.csrf_token,
            redirect_to: None,
        }
    }
}
