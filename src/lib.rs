// src/lib.rs
//! envault — an encrypted, project/environment-scoped secret vault
//!
//! Features:
//! - AES-256-GCM envelopes with a fresh random nonce per value
//! - SQLite-backed store, identity uniqueness on (name, project, environment)
//! - Tag-filtered listing, master-key rotation, JSON export

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod error;
pub mod export;
pub mod key_ops;
pub mod rotate;
pub mod store;

// Re-export everything users need at the crate root
pub use aliases::{SecureConversionsExt, SecureRandomExt, VaultKey32};
pub use config::Config;
pub use crypto::{rotate_envelope, CryptoProvider};
pub use error::{Result, VaultError};
pub use export::export_to_json;
pub use key_ops::{generate_key, key_from_base64, key_to_base64};
pub use store::{Secret, SecretFilter, SecretStore};
