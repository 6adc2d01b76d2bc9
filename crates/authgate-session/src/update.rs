//! Session reducer.
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects.

use authgate_core::Navigation;
use authgate_types::User;

use crate::effects::SessionEffect;
use crate::events::SessionEvent;
use crate::state::{SessionPhase, SessionState};

pub fn update(state: &mut SessionState, event: SessionEvent) -> Vec<SessionEffect> {
    match event {
        SessionEvent::Mounted => {
            if state.is_mounted() {
                return vec![];
            }
            state.phase = SessionPhase::Loading;
            vec![SessionEffect::FetchUser]
        }
        SessionEvent::UserFetched(user) => {
            // Late results (after unmount or logout) are dropped.
            if state.phase != SessionPhase::Loading {
                return vec![];
            }
            let mut effects = Vec::new();
            if let Some(user) = &user {
                effects.push(SessionEffect::PublishUser(user.clone()));
            }
            effects.extend(settle(state, user));
            effects
        }
        SessionEvent::UserUpdated(user) => match state.phase {
            SessionPhase::Authenticated(_) | SessionPhase::Unauthenticated => settle(state, user),
            _ => vec![],
        },
        SessionEvent::LogoutRequested => {
            if !state.is_mounted() {
                return vec![];
            }
            state.phase = SessionPhase::Unauthenticated;
            vec![SessionEffect::ClearUser, SessionEffect::Logout]
        }
        SessionEvent::Unmounted => {
            if !state.is_mounted() {
                return vec![];
            }
            state.phase = SessionPhase::Idle;
            vec![SessionEffect::ClearUser]
        }
    }
}

/// Moves to a terminal phase for `user`.
fn settle(state: &mut SessionState, user: Option<User>) -> Vec<SessionEffect> {
    match user {
        Some(user) if user.password_reset && !state.on_reset_path() => {
            let to = state.reset_password_path.clone();
            tracing::info!(user_id = user.id, %to, "Password reset required");
            state.phase = SessionPhase::Redirecting { to: to.clone() };
            vec![SessionEffect::Navigate(Navigation::Assign(to))]
        }
        Some(user) => {
            state.phase = SessionPhase::Authenticated(user);
            vec![]
        }
        None => {
            state.phase = SessionPhase::Unauthenticated;
            vec![]
        }
    }
}
