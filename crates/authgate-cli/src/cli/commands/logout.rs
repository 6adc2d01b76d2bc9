//! `authgate logout`: backend then provider logout.

use anyhow::Result;
use authgate_core::{AuthGateway, BrowserContext};

use super::print_json;

pub async fn run(gateway: &AuthGateway, ctx: &BrowserContext) -> Result<()> {
    let navigation = gateway.logout().run(ctx).await;
    print_json(&navigation)
}
