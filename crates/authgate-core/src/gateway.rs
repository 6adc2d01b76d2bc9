//! Process-wide wiring of clients and endpoints.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::clients::{BackendClient, ProviderClient, build_http_client};
use crate::config::{Config, Endpoints};
use crate::flow::FlowResolver;
use crate::logout::LogoutCoordinator;

/// Clients sharing one HTTP connection pool, plus the resolved endpoints.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    provider: ProviderClient,
    backend: BackendClient,
    endpoints: Endpoints,
    reset_password_path: String,
}

impl AuthGateway {
    /// Builds the gateway from configuration and the environment.
    ///
    /// # Errors
    /// Fails on malformed URLs or when the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoints = Endpoints::resolve(config).context("Failed to resolve service URLs")?;
        Self::new(
            endpoints,
            config.reset_password_path.clone(),
            config.request_timeout(),
        )
    }

    /// Builds the gateway from already-resolved endpoints.
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be built.
    pub fn new(
        endpoints: Endpoints,
        reset_password_path: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = build_http_client(timeout)?;
        Ok(Self {
            provider: ProviderClient::new(endpoints.provider.clone(), http.clone()),
            backend: BackendClient::new(endpoints.backend.clone(), http),
            endpoints,
            reset_password_path: reset_password_path.into(),
        })
    }

    pub fn provider(&self) -> &ProviderClient {
        &self.provider
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn reset_password_path(&self) -> &str {
        &self.reset_password_path
    }

    /// Resolver sending flow-less pages to the browser entry URL.
    pub fn resolver(&self) -> FlowResolver<'_> {
        FlowResolver::new(&self.provider, &self.backend, &self.endpoints.browser)
    }

    /// Logout chain falling back to the browser entry URL.
    pub fn logout(&self) -> LogoutCoordinator<'_> {
        LogoutCoordinator::new(&self.provider, &self.backend, &self.endpoints.browser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_trims_trailing_slashes() {
        let config = Config {
            provider_url: Some("https://idp.example/".to_string()),
            backend_url: Some("https://api.example/api/".to_string()),
            browser_url: Some("https://app.example/".to_string()),
            ..Config::default()
        };
        // Environment overrides would win; only run when they are unset.
        if ["AUTHGATE_PROVIDER_URL", "AUTHGATE_BACKEND_URL", "AUTHGATE_BROWSER_URL"]
            .iter()
            .any(|var| std::env::var(var).is_ok())
        {
            return;
        }

        let gateway = AuthGateway::from_config(&config).unwrap();
        assert_eq!(gateway.provider().base_url(), "https://idp.example");
        assert_eq!(gateway.backend().base_url(), "https://api.example/api");
        assert_eq!(gateway.endpoints().browser, "https://app.example/");
        assert_eq!(gateway.reset_password_path(), "/reset-password");
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        if std::env::var("AUTHGATE_BACKEND_URL").is_ok() {
            return;
        }
        let config = Config {
            backend_url: Some("not a url".to_string()),
            ..Config::default()
        };
        let err = AuthGateway::from_config(&config).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid backend base URL"));
    }
}
