//! Runtime settings
//!
//! Defaults can be overridden through environment variables:
//! - `FLASHDECK_DATA_DIR`: directory holding the deck
//! - `FLASHDECK_STORAGE`: `json` (default) or `sqlite`
//! - `FLASHDECK_SESSION_SECONDS`: countdown length, a positive integer

use crate::database::{self, DeckStore, JsonFileBackend, SqliteBackend};
use crate::models::DEFAULT_SESSION_SECONDS;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DATA_DIR_VAR: &str = "FLASHDECK_DATA_DIR";
pub const STORAGE_VAR: &str = "FLASHDECK_STORAGE";
pub const SESSION_SECONDS_VAR: &str = "FLASHDECK_SESSION_SECONDS";

const JSON_FILE_NAME: &str = "cards.json";
const SQLITE_FILE_NAME: &str = "flashdeck.sqlite3";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown storage kind '{0}', expected 'json' or 'sqlite'")]
    UnknownStorage(String),

    #[error("Invalid session length '{0}', expected a positive number of seconds")]
    InvalidSessionSeconds(String),

    #[error("Could not determine a data directory, set FLASHDECK_DATA_DIR")]
    DataDirNotFound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageKind {
    #[default]
    Json,
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageKind::Json),
            "sqlite" => Ok(StorageKind::Sqlite),
            _ => Err(ConfigError::UnknownStorage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage: StorageKind,
    pub session_seconds: u32,
}

impl Config {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides from the process environment, keeping every valid one.
    /// Fields whose override is invalid fall back to their default; the
    /// rejected overrides are returned alongside.
    pub fn from_env_lenient() -> (Self, Vec<ConfigError>) {
        Self::from_lookup_lenient(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Fails on the first
    /// invalid override.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, mut errors) = Self::from_lookup_lenient(lookup);
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors.remove(0))
        }
    }

    /// Builds the config from any key/value source, defaulting each field
    /// whose override is invalid.
    pub fn from_lookup_lenient<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        let data_dir = match lookup(DATA_DIR_VAR).filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir().unwrap_or_else(|| {
                errors.push(ConfigError::DataDirNotFound);
                PathBuf::from(".")
            }),
        };

        let storage = match lookup(STORAGE_VAR).map(|kind| kind.parse::<StorageKind>()) {
            Some(Ok(kind)) => kind,
            Some(Err(e)) => {
                errors.push(e);
                StorageKind::default()
            }
            None => StorageKind::default(),
        };

        let session_seconds = match lookup(SESSION_SECONDS_VAR) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(seconds) if seconds > 0 => seconds,
                _ => {
                    errors.push(ConfigError::InvalidSessionSeconds(raw));
                    DEFAULT_SESSION_SECONDS
                }
            },
            None => DEFAULT_SESSION_SECONDS,
        };

        let config = Self {
            data_dir,
            storage,
            session_seconds,
        };
        (config, errors)
    }

    /// Where the deck lives for the configured storage kind.
    pub fn deck_path(&self) -> PathBuf {
        match self.storage {
            StorageKind::Json => self.data_dir.join(JSON_FILE_NAME),
            StorageKind::Sqlite => self.data_dir.join(SQLITE_FILE_NAME),
        }
    }

    /// Opens the deck on the configured backend.
    pub fn open_store(&self) -> database::Result<DeckStore> {
        let store = match self.storage {
            StorageKind::Json => DeckStore::new(Box::new(JsonFileBackend::new(self.deck_path()))),
            StorageKind::Sqlite => {
                DeckStore::new(Box::new(SqliteBackend::open(&self.deck_path())?))
            }
        };
        Ok(store)
    }
}

/// `<local data dir>/flashdeck`, e.g. `~/.local/share/flashdeck` on Linux.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("flashdeck"))
}
