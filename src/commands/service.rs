//! Service mode — runs when no command is given.
//!
//! This is where the periodic backup loop will live.  Until it exists the
//! entry point prints the top-level usage and fails, so a service controller
//! that launches `vault` bare sees a non-zero exit instead of a silent no-op.

use tracing::error;

use super::Outcome;
use crate::{
    cli,
    config::{Config, ConfigStore},
};

pub fn run(store: &ConfigStore, cfg: &Config) -> Outcome {
    println!("{}", cli::usage(&[]));
    error!(
        config = %store.path().display(),
        shares = cfg.shares.len(),
        "service mode is not implemented"
    );
    Outcome::Error
}
