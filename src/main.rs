//! `vault` — directory shares for periodic object-store backups.
//!
//! # Overview
//!
//! `vault` will eventually run as a system service that backs up a set of
//! named directories ("shares") to an object store on a schedule.  Today it
//! manages the share list: adding shares and listing them, persisted as JSON
//! under the user's config directory.
//!
//! # Usage
//!
//! ```text
//! vault                                        # service mode (not implemented yet)
//! vault config adddir --name docs --dir ~/docs # register a share
//! vault config list                            # show registered shares
//! vault config path                            # show where config.json lives
//! vault --config ./test.json config list       # use another config file
//! ```
//!
//! # Module layout
//!
//! | Module                   | Responsibility                              |
//! |--------------------------|---------------------------------------------|
//! | [`cli`]                  | Argument types parsed by clap, usage text   |
//! | [`config`]               | `Config` / `Share` + JSON store             |
//! | [`error`]                | `ConfigError`                               |
//! | [`logging`]              | tracing subscriber setup                    |
//! | [`ui`]                   | Share table rendering, error lines          |
//! | [`commands::config`]     | `vault config …` subcommands                |
//! | [`commands::service`]    | Service mode entry point                    |

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod ui;

use std::{ffi::OsString, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, error::ErrorKind};
use cli::Cli;
use commands::Outcome;
use config::ConfigStore;
use tracing::debug;

fn main() -> Result<ExitCode> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let parsed = Cli::try_parse_from(&args);

    logging::init(parsed.as_ref().is_ok_and(|cli| cli.verbose))?;

    let path = match parsed.as_ref() {
        Ok(cli) => cli.config.clone(),
        Err(_) => cli::config_flag(&args),
    };
    let path = match path {
        Some(path) => path,
        None => ConfigStore::default_path().context("locating config file")?,
    };
    let store = ConfigStore::new(path);

    // Every invocation loads first: a config we could not read stops the
    // process before help, usage or any command runs.
    let mut cfg = store.load().context("loading config")?;
    debug!(config_loc = %store.path().display(), shares = cfg.shares.len(), "loaded configuration");

    let cli = match parsed {
        Ok(cli) => cli,
        Err(e) => return Ok(parse_failure(&e).into()),
    };

    Ok(commands::dispatch(cli.command, &store, &mut cfg).into())
}

/// Print clap's message and map it to an exit code.
///
/// Help and version requests succeed; every other parse error is a usage
/// error.
fn parse_failure(err: &clap::Error) -> Outcome {
    // Nothing useful to do if stdout/stderr is already gone.
    err.print().ok();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Outcome::Ok,
        _ => Outcome::Error,
    }
}
