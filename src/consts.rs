// src/consts.rs
//! Shared constants — scheme parameters and defaults

/// Master key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes (96-bit)
pub const NONCE_LEN: usize = 12;

/// Envelope scheme version written by `CryptoProvider::encrypt`
pub const ENVELOPE_VERSION: u32 = 1;

/// Random bytes per secret id (hex-encoded at assignment)
pub const ID_LEN_BYTES: usize = 16;

/// Format tag written at the top of JSON exports
pub const EXPORT_FORMAT: &str = "envault-export-v1";
