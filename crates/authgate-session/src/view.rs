//! What the guarded area renders for a given state.

use authgate_types::User;

use crate::state::{SessionPhase, SessionState};

#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Loading,
    /// Render the protected children for this user.
    Children(&'a User),
    Nothing,
}

pub fn view(state: &SessionState) -> View<'_> {
    match &state.phase {
        SessionPhase::Loading => View::Loading,
        SessionPhase::Authenticated(user) => View::Children(user),
        SessionPhase::Idle | SessionPhase::Unauthenticated | SessionPhase::Redirecting { .. } => {
            View::Nothing
        }
    }
}
