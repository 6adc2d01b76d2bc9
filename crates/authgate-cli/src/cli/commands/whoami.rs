//! `authgate whoami`: the provider session behind the given cookie.

use anyhow::Result;
use authgate_core::session::validate_session;
use authgate_core::{AuthGateway, BrowserContext};

use super::print_json;

/// Prints the provider session, or `null` when there is none.
pub async fn run(gateway: &AuthGateway, ctx: &BrowserContext) -> Result<()> {
    let session = validate_session(gateway.provider(), ctx).await;
    print_json(&session)
}
