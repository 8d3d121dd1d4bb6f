//! `vault config <sub>` — view or modify the share list.
//!
//! | Subcommand | Effect                                    | Saves |
//! |------------|-------------------------------------------|-------|
//! | `adddir`   | Append a share and persist the config     | yes   |
//! | `list`     | Print the share table                     | no    |
//! | `path`     | Print the config file location            | no    |
//!
//! `config` without a subcommand prints the config usage and fails.

use std::io::{self, Write};

use tracing::{error, info};

use super::Outcome;
use crate::{
    cli::{self, AddDirArgs, ConfigCommand},
    config::{Config, ConfigStore},
    ui,
};

pub fn run(command: Option<ConfigCommand>, store: &ConfigStore, cfg: &mut Config) -> Outcome {
    match command {
        Some(ConfigCommand::AddDir(args)) => add_dir(&args, store, cfg),
        Some(ConfigCommand::List) => list(cfg, &mut io::stdout().lock()),
        Some(ConfigCommand::Path) => {
            println!("{}", store.path().display());
            Outcome::Ok
        },
        None => {
            println!("{}", cli::usage(&["config"]));
            Outcome::Error
        },
    }
}

/// Append a share and save.
///
/// Both `--name` and `--dir` must be non-empty, otherwise nothing is touched.
/// `cfg` is only updated once the new config has been written, so a failed
/// save leaves the in-memory state as it was.
pub fn add_dir(args: &AddDirArgs, store: &ConfigStore, cfg: &mut Config) -> Outcome {
    if args.name.is_empty() || args.dir.is_empty() {
        ui::print_error("both --name and --dir are required");
        println!("{}", cli::usage(&["config", "adddir"]));
        return Outcome::Error;
    }

    let mut updated = cfg.clone();
    updated.add_share(args.name.as_str(), args.dir.as_str());

    if let Err(e) = store.save(&updated) {
        let e = anyhow::Error::from(e);
        error!("failed to save config: {e:#}");
        ui::print_error(&format!("failed to save config: {e:#}"));
        return Outcome::Error;
    }

    *cfg = updated;
    info!(name = %args.name, dir = %args.dir, "added share");
    Outcome::Ok
}

pub fn list(cfg: &Config, out: &mut dyn Write) -> Outcome {
    match ui::write_shares(out, &cfg.shares).and_then(|()| out.flush()) {
        Ok(()) => Outcome::Ok,
        Err(e) => {
            error!(error = %e, "failed to write share list");
            Outcome::Error
        },
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
