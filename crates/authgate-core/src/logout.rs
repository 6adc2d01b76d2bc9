//! Logout chain: backend logout, then the provider's logout redirect.

use crate::browser::{BrowserContext, Navigation};
use crate::clients::{BackendClient, ProviderClient, error_chain};

/// Tears down both sessions and decides where the browser goes next.
#[derive(Debug, Clone, Copy)]
pub struct LogoutCoordinator<'a> {
    provider: &'a ProviderClient,
    backend: &'a BackendClient,
    fallback_url: &'a str,
}

impl<'a> LogoutCoordinator<'a> {
    pub fn new(
        provider: &'a ProviderClient,
        backend: &'a BackendClient,
        fallback_url: &'a str,
    ) -> Self {
        Self {
            provider,
            backend,
            fallback_url,
        }
    }

    /// Runs the chain once and returns exactly one navigation.
    ///
    /// The provider's `logout_url` replaces the current history entry; any
    /// failure along the way assigns the fallback URL instead.
    pub async fn run(&self, ctx: &BrowserContext) -> Navigation {
        let redirect_to = match self.backend.logout(ctx).await {
            Ok(response) if !response.redirect_to.is_empty() => response.redirect_to,
            Ok(_) => {
                tracing::warn!("Backend logout returned no redirect target");
                return self.fallback();
            }
            Err(err) => {
                tracing::warn!(error = %error_chain(&err), "Backend logout failed");
                return self.fallback();
            }
        };

        match self.provider.follow_logout(&redirect_to, ctx).await {
            Ok(response) => {
                let target = response
                    .logout_url
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| self.fallback_url.to_string());
                tracing::info!(%target, "Logged out");
                Navigation::Replace(target)
            }
            Err(err) => {
                tracing::warn!(%redirect_to, error = %error_chain(&err), "Provider logout failed");
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> Navigation {
        Navigation::Assign(self.fallback_url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const FALLBACK: &str = "https://app.example/";

    async fn run(server: &MockServer, ctx: &BrowserContext) -> Navigation {
        let http = reqwest::Client::new();
        let provider = ProviderClient::new(server.uri(), http.clone());
        let backend = BackendClient::new(format!("{}/api", server.uri()), http);
        LogoutCoordinator::new(&provider, &backend, FALLBACK)
            .run(ctx)
            .await
    }

    #[tokio::test]
    async fn test_logout_success_replaces_with_provider_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .and(body_json(serde_json::json!({})))
            .and(header("cookie", "sid=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "redirect_to": format!("{}/self-service/logout?token=t", server.uri()) }
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

        let ctx = BrowserContext::new(Some("sid=1".to_string()), "/dashboard");
        assert_eq!(
            run(&server, &ctx).await,
            Navigation::Replace("https://idp/done".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_logout_url_replaces_with_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "redirect_to": "/self-service/logout" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/self-service/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        assert_eq!(
            run(&server, &BrowserContext::default()).await,
            Navigation::Replace(FALLBACK.to_string())
        );
    }

    #[tokio::test]
    async fn test_backend_failure_assigns_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(
            run(&server, &BrowserContext::default()).await,
            Navigation::Assign(FALLBACK.to_string())
        );
        // No provider call after a failed backend logout.
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_assigns_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "redirect_to": "/self-service/logout" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/self-service/logout"))
            .respond_with(ResponseTemplate::new(410))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(
            run(&server, &BrowserContext::default()).await,
            Navigation::Assign(FALLBACK.to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_redirect_assigns_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "redirect_to": "" }
            })))
            .mount(&server)
            .await;

        assert_eq!(
            run(&server, &BrowserContext::default()).await,
            Navigation::Assign(FALLBACK.to_string())
        );
    }
}
