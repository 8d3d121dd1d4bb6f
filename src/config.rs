//! Configuration types and the on-disk store.
//!
//! `Config` is a direct 1-to-1 mapping of `config.json`.  The file is entirely
//! optional — a missing file loads as an empty share list and is created the
//! first time a share is added.
//!
//! # File format
//!
//! ```json
//! {
//!     "Shares": [
//!         {
//!             "Name": "docs",
//!             "Dir": "/home/alice/docs"
//!         }
//!     ]
//! }
//! ```
//!
//! Field names are capitalised exactly as shown and the file is written with
//! four-space indentation.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ConfigError;

/// Directory under the platform config dir that holds `config.json`.
const APP_DIR: &str = "vault";
const FILE_NAME: &str = "config.json";

// ─── Types ────────────────────────────────────────────────────────────────────

/// A named directory that will be backed up under its own top-level prefix
/// in the object store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Share {
    #[serde(rename = "Name")]
    pub name: String,

    /// Absolute or relative; existence is not checked.
    #[serde(rename = "Dir")]
    pub dir: String,
}

/// Root configuration object, deserialised from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Shares in insertion order.  Duplicates are allowed.
    #[serde(rename = "Shares", default, deserialize_with = "null_as_empty")]
    pub shares: Vec<Share>,
}

impl Config {
    /// Append a share.  No validation, no deduplication.
    pub fn add_share(&mut self, name: impl Into<String>, dir: impl Into<String>) {
        self.shares.push(Share {
            name: name.into(),
            dir: dir.into(),
        });
    }
}

// Files written by older builds store an empty list as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Share>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Share>>::deserialize(deserializer)?.unwrap_or_default())
}

// ─── Store ────────────────────────────────────────────────────────────────────

/// Handle to the config file.
///
/// Built once in `main` and passed by reference into every command handler,
/// so tests can point it at a temp path instead of the user's real config.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<platform config dir>/vault/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the config file.
    ///
    /// A missing file is a normal first-run state and yields an empty
    /// `Config`.  Any other read failure, or contents that do not parse, is an
    /// error: the caller must not run against a config it could not read.
    pub fn load(&self) -> Result<Config, ConfigError> {
        debug!(path = %self.path.display(), "loading config");

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no config file found");
                return Ok(Config::default());
            },
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            },
        };

        debug!("parsing config json");
        parse(&text).map_err(|source| ConfigError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Write `cfg` to disk, replacing any previous file.
    ///
    /// The parent directory is created if needed.  Not crash-safe: a failure
    /// mid-write can leave a truncated file behind.
    pub fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }

        let bytes = to_json(cfg)?;
        fs::write(&self.path, bytes).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), shares = cfg.shares.len(), "saved config");
        Ok(())
    }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Parse `config.json`.  Key names match case-insensitively, so
/// `{"shares": [{"name": …}]}` loads the same shares as the canonical spelling.
fn parse(text: &str) -> serde_json::Result<Config> {
    let mut value: Value = serde_json::from_str(text)?;
    fold_key(&mut value, "Shares");
    if let Some(Value::Array(shares)) = value.get_mut("Shares") {
        for share in shares {
            fold_key(share, "Name");
            fold_key(share, "Dir");
        }
    }
    serde_json::from_value(value)
}

/// Rename any ASCII case variant of `canonical` in `value` to `canonical`.
fn fold_key(value: &mut Value, canonical: &str) {
    let Value::Object(map) = value else {
        return;
    };
    let variants: Vec<String> = map
        .keys()
        .filter(|k| k.as_str() != canonical && k.eq_ignore_ascii_case(canonical))
        .cloned()
        .collect();
    for key in variants {
        if let Some(v) = map.remove(&key) {
            map.insert(canonical.to_owned(), v);
        }
    }
}

/// Serialise with four-space indentation and a trailing newline.
fn to_json(cfg: &Config) -> Result<Vec<u8>, ConfigError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    cfg.serialize(&mut ser).map_err(ConfigError::Serialize)?;
    buf.push(b'\n');
    Ok(buf)
}

/// `mkdir -p`, refusing when `dir` already exists as something else.
fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::NotADirectory {
            path: dir.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        },
        Err(source) => Err(ConfigError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("vault").join("config.json"));
        (dir, store)
    }

    // ── Config ────────────────────────────────────────────────────────────────

    #[test]
    fn add_share_preserves_insertion_order() {
        let mut cfg = Config::default();
        cfg.add_share("docs", "/tmp/docs");
        cfg.add_share("pics", "/tmp/pics");

        let names: Vec<&str> = cfg.shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["docs", "pics"]);
    }

    #[test]
    fn add_share_keeps_duplicates() {
        let mut cfg = Config::default();
        cfg.add_share("docs", "/tmp/docs");
        cfg.add_share("docs", "/tmp/docs");
        assert_eq!(cfg.shares.len(), 2);
        assert_eq!(cfg.shares[0], cfg.shares[1]);
    }

    // ── Serialisation ─────────────────────────────────────────────────────────

    #[test]
    fn json_uses_capitalised_keys_and_four_space_indent() {
        let mut cfg = Config::default();
        cfg.add_share("docs", "/home/user/docs");
        let text = String::from_utf8(to_json(&cfg).unwrap()).unwrap();

        insta::assert_snapshot!(text, @r#"
{
    "Shares": [
        {
            "Name": "docs",
            "Dir": "/home/user/docs"
        }
    ]
}
"#);
    }

    #[test]
    fn null_shares_deserialise_as_empty() {
        let cfg: Config = serde_json::from_str(r#"{"Shares": null}"#).unwrap();
        assert!(cfg.shares.is_empty());
    }

    #[test]
    fn missing_shares_key_deserialises_as_empty() {
        let cfg: Config = serde_json::from_str(r#"{"Other": 1}"#).unwrap();
        assert!(cfg.shares.is_empty());
    }

    #[test]
    fn keys_match_case_insensitively() {
        let cfg = parse(r#"{"shares": [{"name": "music", "DIR": "/srv/music"}]}"#).unwrap();
        assert_eq!(cfg.shares, [Share {
            name: "music".into(),
            dir: "/srv/music".into(),
        }]);
    }

    #[test]
    fn lowercase_shares_survive_a_save() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"shares":[{"name":"music","dir":"/srv/music"}]}"#).unwrap();

        let mut cfg = store.load().unwrap();
        cfg.add_share("docs", "/tmp/docs");
        store.save(&cfg).unwrap();

        let names: Vec<String> = store.load().unwrap().shares.into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["music", "docs"]);
    }

    #[test]
    fn wrongly_typed_lowercase_shares_is_rejected() {
        assert!(parse(r#"{"shares": "music"}"#).is_err());
    }

    // ── load ──────────────────────────────────────────────────────────────────

    #[test]
    fn load_returns_empty_config_for_missing_file() {
        let (_dir, store) = temp_store();
        assert!(!store.path().exists(), "test precondition: file must not exist");

        let cfg = store.load().expect("missing file is not an error");
        assert!(cfg.shares.is_empty());
    }

    #[test]
    fn load_errors_on_invalid_json() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not valid json ][[[").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }), "got {err:?}");
    }

    #[test]
    fn load_errors_on_empty_file() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "").unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn load_errors_when_path_is_a_directory() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path()).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "got {err:?}");
    }

    // ── save ──────────────────────────────────────────────────────────────────

    #[test]
    fn save_creates_missing_parent_directory() {
        let (_dir, store) = temp_store();
        store.save(&Config::default()).unwrap();
        assert!(store.path().is_file());
    }

    #[test]
    fn save_then_load_round_trips_in_order() {
        let (_dir, store) = temp_store();
        let mut cfg = Config::default();
        cfg.add_share("docs", "/tmp/docs");
        cfg.add_share("pics", "relative/pics");
        cfg.add_share("docs", "/tmp/docs");

        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), cfg);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let (_dir, store) = temp_store();
        let mut cfg = Config::default();
        cfg.add_share("a", "/a");
        cfg.add_share("b", "/b");
        store.save(&cfg).unwrap();

        let mut smaller = Config::default();
        smaller.add_share("c", "/c");
        store.save(&smaller).unwrap();

        assert_eq!(store.load().unwrap(), smaller);
    }

    #[test]
    fn save_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("vault");
        fs::write(&blocker, "i am a file").unwrap();
        let store = ConfigStore::new(blocker.join("config.json"));

        let err = store.save(&Config::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory { .. }), "got {err:?}");
    }

    #[test]
    fn default_path_ends_with_app_file() {
        // Some CI sandboxes have no config dir at all.
        if let Ok(path) = ConfigStore::default_path() {
            assert!(path.ends_with("vault/config.json"));
        }
    }
}
