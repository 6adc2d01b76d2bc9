//! Client-side user session for the authenticated area.
//!
//! Architecture:
//! - `state`: what the session knows (phase, current path)
//! - `events`: inputs the runtime feeds the reducer
//! - `update`: the pure reducer, returning effects
//! - `effects`: commands the runtime executes (I/O, navigation)
//! - `runtime`: executes effects against the backend and a `Navigator`
//! - `store`: the shared user cell other components read and write
//! - `view`: what the guarded area renders

pub mod effects;
pub mod events;
pub mod runtime;
pub mod state;
pub mod store;
pub mod update;
pub mod view;

pub use effects::SessionEffect;
pub use events::SessionEvent;
pub use runtime::SessionRuntime;
pub use state::{SessionPhase, SessionState};
pub use store::SessionHandle;
pub use update::update;
pub use view::{View, view};
