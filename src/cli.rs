//! Command-line interface definition.
//!
//! All argument parsing lives here so the rest of the codebase can stay
//! agnostic to `clap`.  The `Cli` struct is parsed once in `main` and its
//! `command` is handed to [`crate::commands::dispatch`].

use std::{ffi::OsString, path::PathBuf};

use clap::{CommandFactory, Parser};

const ABOUT: &str = "\
Running vault with no command starts the app in service mode. In this mode, the
backup process will be performed periodically in a loop. This is how the system
service controller starts up the app. To run in interactive mode, one of the
commands below must be present.";

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name    = "vault",
    about   = "Periodic directory backups to an object store",
    long_about = ABOUT,
    version,
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Path to the configuration file.
    ///
    /// Defaults to `vault/config.json` under the platform's user config
    /// directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit debug logging to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run.  Omit to start service mode.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// View or modify the app configuration.
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommand>,
    },
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Add a new directory to back up.
    ///
    /// The name is used as the share name, which corresponds to a top-level
    /// "folder" in the object store.  The directory is backed up recursively,
    /// preserving file names and layout under that share.
    #[command(name = "adddir")]
    AddDir(AddDirArgs),

    /// List the configured shares.
    List,

    /// Print the location of the configuration file.
    Path,
}

#[derive(clap::Args, Debug, PartialEq, Eq)]
pub struct AddDirArgs {
    /// The name of the share to create.
    #[arg(long, value_name = "VALUE", default_value = "")]
    pub name: String,

    /// The directory to back up to the share.
    #[arg(long, value_name = "VALUE", default_value = "")]
    pub dir: String,
}

// ─── Usage text ───────────────────────────────────────────────────────────────

/// Long help for the top level, or for the subcommand at `path`.
///
/// `usage(&[])` is the top-level text, `usage(&["config"])` the config text.
pub fn usage(path: &[&str]) -> String {
    let mut target = Cli::command();
    target.build();
    for name in path {
        match target.find_subcommand(name) {
            Some(sub) => target = sub.clone(),
            None => break,
        }
    }
    target.render_long_help().to_string()
}

// ─── Pre-scan ─────────────────────────────────────────────────────────────────

/// Find the `-c/--config` value in raw arguments that clap rejected.
///
/// The config must be loaded even when parsing fails, so a broken config is
/// reported ahead of help or usage output.  Accepts `--config P`,
/// `--config=P`, `-c P`, `-cP` and `-c=P`; stops at `--`.
pub fn config_flag(args: &[OsString]) -> Option<PathBuf> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let Some(arg) = arg.to_str() else {
            continue;
        };
        if arg == "--" {
            break;
        }
        if arg == "--config" || arg == "-c" {
            return iter.next().map(PathBuf::from);
        }
        if let Some(value) = arg.strip_prefix("--config=") {
            return Some(value.into());
        }
        if let Some(value) = arg.strip_prefix("-c").filter(|v| !v.is_empty()) {
            return Some(value.strip_prefix('=').unwrap_or(value).into());
        }
    }
    None
}

// ─── Tests ────────────────────────────────────────────────────────────────────
