//! `authgate facility`: the default facility loader.

use anyhow::Result;
use authgate_core::loaders::check_default_facility;
use authgate_core::{AuthGateway, BrowserContext};

use super::print_json;

pub async fn run(gateway: &AuthGateway, ctx: &BrowserContext) -> Result<()> {
    let facility = check_default_facility(gateway.backend(), ctx).await;
    print_json(&facility)
}
