//! `authgate flow`: looks up a single login flow.

use anyhow::Result;
use authgate_core::flow::initialize_flow;
use authgate_core::{AuthGateway, BrowserContext};
use authgate_types::AuthFlow;

use super::print_json;

/// Prints the flow payload; the empty payload when the lookup fails.
pub async fn run(gateway: &AuthGateway, id: &str, ctx: &BrowserContext) -> Result<()> {
    let payload = match initialize_flow(gateway.provider(), id, ctx).await {
        Ok(flow) => AuthFlow::from(flow),
        Err(_) => AuthFlow::sentinel(),
    };
    print_json(&payload)
}
