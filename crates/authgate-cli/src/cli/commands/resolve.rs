//! `authgate resolve`: the login page route loader.

use anyhow::Result;
use authgate_core::loaders::check_existing_flow;
use authgate_core::{AuthGateway, BrowserContext};

use super::print_json;

pub async fn run(gateway: &AuthGateway, url: &str, ctx: &BrowserContext) -> Result<()> {
    let payload = check_existing_flow(&gateway.resolver(), url, ctx).await;
    print_json(&payload)
}
