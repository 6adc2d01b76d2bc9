//! Core authgate library (config, provider/backend clients, flow resolution, logout).

pub mod browser;
pub mod clients;
pub mod config;
pub mod flow;
pub mod gateway;
pub mod loaders;
pub mod logging;
pub mod logout;
pub mod session;

pub use browser::{BrowserContext, Navigation, Navigator};
pub use gateway::AuthGateway;
pub use logout::LogoutCoordinator;
