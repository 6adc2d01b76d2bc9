//! HTTP clients for the identity provider and the application backend.

pub mod backend;
pub mod provider;
mod shared;

pub use backend::BackendClient;
pub use provider::{ProviderClient, ProviderLoginFlow};
pub use shared::{ClientError, build_http_client, error_chain};
