//! Session effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O or navigates on its own.

use authgate_core::Navigation;
use authgate_types::User;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// GET the current user from the backend.
    FetchUser,
    /// Write a freshly fetched user to the shared cell.
    PublishUser(User),
    /// Ask the browser to navigate.
    Navigate(Navigation),
    /// Run the logout chain and navigate to wherever it ends.
    Logout,
    /// Empty the shared cell.
    ClearUser,
}
