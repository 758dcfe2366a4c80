// src/config.rs
//! Configuration loading — supplies (database path, master key) to callers
//!
//! The core types never read ambient process state; this loader is the one
//! place env vars and config files are consulted, and callers pass the
//! resulting values in explicitly.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, VaultError};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub keys: Keys,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    #[serde(default = "default_db_path")]
    pub database: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Keys {
    /// Master key, base64 (must decode to 32 bytes)
    #[serde(default)]
    pub master: String,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            database: default_db_path(),
        }
    }
}

impl Config {
    /// Load from an explicit TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| VaultError::Config(format!("{}: {e}", path.as_ref().display())))
    }

    /// Load from `ENVAULT_CONFIG` (default `envault.toml`), then apply
    /// `ENVAULT_DB` / `ENVAULT_KEY` overrides. The master key must come
    /// from one of those sources — there is no built-in fallback.
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("ENVAULT_CONFIG").unwrap_or_else(|_| "envault.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Config {
                paths: Paths::default(),
                keys: Keys::default(),
            }
        };

        if let Ok(db) = std::env::var("ENVAULT_DB") {
            config.paths.database = PathBuf::from(db);
        }
        if let Ok(key) = std::env::var("ENVAULT_KEY") {
            config.keys.master = key;
        }

        if config.keys.master.is_empty() {
            return Err(VaultError::Config(
                "no master key: set keys.master or ENVAULT_KEY".to_string(),
            ));
        }
        Ok(config)
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("envault")
        .join("secrets.db")
}
