// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Error, Debug)]
pub enum VaultError {
    /// Key material missing, undecodable, or the wrong length.
    /// Raised when a provider is constructed, never deferred to first use.
    #[error("invalid key material: {reason}")]
    Key { reason: String },

    #[error("encryption failed: {reason}")]
    Encryption { reason: String },

    /// Authentication failure, malformed envelope, or non-UTF-8 plaintext.
    /// The value cannot be recovered and nothing about it may be trusted.
    #[error("decryption failed: {reason}")]
    Decryption { reason: String },

    #[error("unsupported envelope version {version}")]
    UnsupportedVersion { version: u32 },

    #[error("secret '{name}' already exists in {project}/{environment}")]
    Conflict {
        name: String,
        project: String,
        environment: String,
    },

    #[error("secret {id} not found")]
    NotFound { id: String },

    /// A stored row failed validation while being mapped back to a record
    #[error("corrupt record {id}: {reason}")]
    CorruptRecord { id: String, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
