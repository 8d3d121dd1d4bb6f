//! Subcommand handlers.
//!
//! Each file in this module corresponds to one user-facing command:
//!
//! | File          | Invocation              | Description                        |
//! |---------------|-------------------------|------------------------------------|
//! | `config.rs`   | `vault config <sub>`    | View or modify the share list      |
//! | `service.rs`  | `vault` (no command)    | Service mode entry point           |
//!
//! Every handler takes the [`ConfigStore`] handle and the loaded [`Config`]
//! and returns an [`Outcome`]; `main` turns that into the process exit code.

pub mod config;
pub mod service;

use std::process::ExitCode;

use crate::{
    cli::Command,
    config::{Config, ConfigStore},
};

/// Result of running a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
    /// Reserved for partial success.  Nothing emits it yet.
    #[allow(dead_code)]
    Warn,
}

impl Outcome {
    pub const fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Error => 1,
            Self::Warn => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        Self::from(outcome.code())
    }
}

/// Route a parsed command to its handler.
pub fn dispatch(command: Option<Command>, store: &ConfigStore, cfg: &mut Config) -> Outcome {
    match command {
        None => service::run(store, cfg),
        Some(Command::Config { command }) => config::run(command, store, cfg),
    }
}
