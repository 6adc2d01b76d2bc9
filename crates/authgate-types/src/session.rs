//! Identity provider session (whoami) document.
//!
//! Only the fields the login flow branches on are typed. Everything else is
//! kept in `extra` so the document can be forwarded to the backend unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<Traits>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    #[serde(default)]
    pub username: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Returns the identity and its traits when the session is active and
    /// carries traits. Anything else counts as "not signed in".
    pub fn active_identity(&self) -> Option<(&Identity, &Traits)> {
        if !self.active {
            return None;
        }
        let identity = self.identity.as_ref()?;
        let traits = identity.traits.as_ref()?;
        Some((identity, traits))
    }
}
