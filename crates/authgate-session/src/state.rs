//! Session state.

use authgate_types::User;

/// Where the session is in its lifecycle.
///
/// `Idle` is both "not yet mounted" and "unmounted"; everything else only
/// exists while mounted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionPhase {
    #[default]
    Idle,
    /// The current user is being fetched.
    Loading,
    Authenticated(User),
    Unauthenticated,
    /// A navigation was issued; nothing renders from here on.
    Redirecting { to: String },
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Path of the page hosting the guarded area.
    pub path: String,
    /// Users with a pending password reset are held on this path.
    pub reset_password_path: String,
}

impl SessionState {
    pub fn new(path: impl Into<String>, reset_password_path: impl Into<String>) -> Self {
        Self {
            phase: SessionPhase::Idle,
            path: path.into(),
            reset_password_path: reset_password_path.into(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.phase != SessionPhase::Idle
    }

    pub fn user(&self) -> Option<&User> {
        match &self.phase {
            SessionPhase::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn on_reset_path(&self) -> bool {
        self.path == self.reset_password_path
    }
}
