//! Log setup for the CLI.
//!
//! Filter priority: `--log` / `TIMESTATS_LOG`, then `RUST_LOG`, then `warn`.
//! Logs go to stderr so stdout only carries dump output.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

pub fn init(directive: Option<&str>) -> Result<()> {
    let filter = create_filter(directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}

fn create_filter(directive: Option<&str>) -> Result<EnvFilter> {
    if let Some(directive) = directive {
        return Ok(EnvFilter::try_new(directive)?);
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
}
