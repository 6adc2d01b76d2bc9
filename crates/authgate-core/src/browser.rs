//! Browser-facing inputs and outputs.
//!
//! `BrowserContext` carries what a browser would attach implicitly (cookies,
//! current location). `Navigation` is what the flow logic asks the browser to
//! do; a `Navigator` at the edge performs it.

use reqwest::RequestBuilder;
use reqwest::header::COOKIE;
use serde::Serialize;

/// Credentials and location of the browser tab a decision is made for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserContext {
    /// Raw `Cookie` header value forwarded with provider and backend calls.
    pub cookie: Option<String>,
    /// Current location path (e.g. `/dashboard`).
    pub path: String,
}

impl BrowserContext {
    pub fn new(cookie: Option<String>, path: impl Into<String>) -> Self {
        Self {
            cookie: cookie.filter(|c| !c.trim().is_empty()),
            path: path.into(),
        }
    }

    /// Attaches the browser's cookies to an outbound request.
    pub(crate) fn attach(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }
}

/// A full browser navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum Navigation {
    /// Navigate and push a history entry.
    Assign(String),
    /// Navigate replacing the current history entry.
    Replace(String),
}

impl Navigation {
    pub fn url(&self) -> &str {
        match self {
            Navigation::Assign(url) | Navigation::Replace(url) => url,
        }
    }
}

/// Boundary that carries out navigation commands.
pub trait Navigator {
    fn navigate(&mut self, navigation: Navigation);
}
