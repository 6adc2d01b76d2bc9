//! Backend HTTP contract: response envelope and auth payloads.

use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Backend responses wrap their payload in `{"data": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Redirect instructions returned by the refresh and logout endpoints.
///
/// The provider's logout endpoint answers with only `logout_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub redirect_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logout_url: Option<String>,
}

/// Body of `POST /auth/refresh`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub username: String,
    /// Provider identity id.
    pub identity: String,
    pub csrf_token: String,
    pub session: Session,
    pub challenge: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_auth_response() {
        let resp: ApiEnvelope<AuthResponse> = serde_json::from_str(
            r#"{"message": "ok", "data": {"redirect_to": "https://idp/logout"}}"#,
        )
        .unwrap();
        assert_eq!(resp.data.redirect_to, "https://idp/logout");
        assert_eq!(resp.data.logout_url, None);
    }

    #[test]
    fn test_logout_url_only_response() {
        let resp: AuthResponse =
            serde_json::from_str(r#"{"logout_url": "https://idp/done"}"#).unwrap();
        assert!(resp.redirect_to.is_empty());
        assert_eq!(resp.logout_url.as_deref(), Some("https://idp/done"));
    }
}
