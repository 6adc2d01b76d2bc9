//! Provider session checks and backend session refresh.

use authgate_types::{AuthResponse, RefreshRequest, Session};

use crate::browser::BrowserContext;
use crate::clients::{BackendClient, ClientError, ProviderClient, error_chain};

/// Returns the browser's provider session, or `None` when there is none.
///
/// Network failures and non-200 answers read as "no active session"; they
/// are logged, never returned. No retries.
pub async fn validate_session(provider: &ProviderClient, ctx: &BrowserContext) -> Option<Session> {
    match provider.whoami(ctx).await {
        Ok(session) => Some(session),
        Err(err) => {
            if err.status().is_some() {
                tracing::debug!(
                    error = %error_chain(&err),
                    "No active sessions found for this user"
                );
            } else {
                tracing::warn!(error = %error_chain(&err), "Session check failed");
            }
            None
        }
    }
}

/// Builds the refresh body from an active session and a freshly looked-up flow.
pub fn refresh_request(
    session: Session,
    username: String,
    identity: String,
    csrf_token: String,
    challenge: String,
) -> RefreshRequest {
    RefreshRequest {
        username,
        identity,
        csrf_token,
        session,
        challenge,
    }
}

/// Exchanges an active provider session for an application redirect.
///
/// # Errors
/// Returns the client failure; callers decide whether it matters.
pub async fn refresh_session(
    backend: &BackendClient,
    body: &RefreshRequest,
    ctx: &BrowserContext,
) -> Result<AuthResponse, ClientError> {
    let response = backend.refresh(body, ctx).await;
    if let Err(err) = &response {
        tracing::warn!(
            identity = %body.identity,
            error = %error_chain(err),
            "Session refresh failed"
        );
    }
    response
}
