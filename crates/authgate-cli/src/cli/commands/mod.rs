//! CLI command handlers.

pub mod config;
pub mod facility;
pub mod flow;
pub mod logout;
pub mod resolve;
pub mod session;
pub mod whoami;

use anyhow::{Context, Result};
use serde::Serialize;

/// Writes `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}
