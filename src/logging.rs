//! Logging setup.
//!
//! Everything goes to stderr so stdout stays clean for `config list` and
//! `config path`.  The level is `warn` by default and `debug` with
//! `--verbose`; `RUST_LOG` overrides both.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, prelude::*};

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

pub fn init(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow!("initialising logging: {e}"))
}
