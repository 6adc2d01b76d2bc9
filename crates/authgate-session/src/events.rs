//! Events fed to the session reducer.

use authgate_types::User;

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The guarded area was mounted.
    Mounted,
    /// The current-user fetch finished. Failures arrive as `None`.
    UserFetched(Option<User>),
    /// Another component wrote the user cell.
    UserUpdated(Option<User>),
    LogoutRequested,
    Unmounted,
}
