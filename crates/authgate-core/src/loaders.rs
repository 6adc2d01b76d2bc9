//! Route loaders: the JSON-facing entry points a router calls before render.

use authgate_types::{AuthFlow, Facility};

use crate::browser::BrowserContext;
use crate::clients::{BackendClient, error_chain};
use crate::flow::FlowResolver;

/// Facility the application falls back to when none is chosen.
pub const DEFAULT_FACILITY_ID: i64 = 1;

/// Login page loader: resolves `page` into the wire payload.
pub async fn check_existing_flow(
    resolver: &FlowResolver<'_>,
    page: &str,
    ctx: &BrowserContext,
) -> AuthFlow {
    resolver.resolve(page, ctx).await.into_auth_flow()
}

/// Loads the default facility, or `None` when the backend cannot supply it.
pub async fn check_default_facility(
    backend: &BackendClient,
    ctx: &BrowserContext,
) -> Option<Facility> {
    match backend.facility(DEFAULT_FACILITY_ID, ctx).await {
        Ok(facility) => facility,
        Err(err) => {
            tracing::warn!(
                facility_id = DEFAULT_FACILITY_ID,
                error = %error_chain(&err),
                "Default facility unavailable"
            );
            None
        }
    }
}
