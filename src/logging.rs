// src/logging.rs

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` directives apply on top of
/// `log_level`; an unparseable `log_level` falls back to INFO.
pub fn init(log_level: &str) -> Result<()> {
    let default_directive: Directive = log_level.parse().unwrap_or_else(|_| Level::INFO.into());
    let filter = EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {}", e))
}
