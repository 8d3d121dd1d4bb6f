//! Error types for the configuration store.
//!
//! Variants fall into two families:
//!
//! | Family | Variants                                           | Handling              |
//! |--------|----------------------------------------------------|-----------------------|
//! | load   | `NoConfigDir`, `Read`, `Malformed`                 | fatal, aborts startup |
//! | save   | `NotADirectory`, `CreateDir`, `Write`, `Serialize` | logged, exit code 1   |

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the platform config directory")]
    NoConfigDir,

    #[error("reading {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing {}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} exists but is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("creating directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serialising config")]
    Serialize(#[source] serde_json::Error),
}
