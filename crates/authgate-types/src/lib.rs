//! Shared data model for authgate (login flows, provider sessions, backend users).

pub mod api;
pub mod flow;
pub mod session;
pub mod user;

pub use api::{ApiEnvelope, AuthResponse, RefreshRequest};
pub use flow::{AuthFlow, LoginFlow};
pub use session::{Identity, Session, Traits};
pub use user::{Facility, User, UserRole};
