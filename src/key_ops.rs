// src/key_ops.rs
//! Master key generation, encoding, and validation
//!
//! Keys are 32 random bytes: base64 outside the process, zeroizing
//! `VaultKey32` values inside it. Length is enforced at the boundary.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::aliases::{RandomVaultKey32, SecureRandomExt, VaultKey32};
use crate::consts::KEY_LEN;
use crate::error::{Result, VaultError};

/// Generate a new random 256-bit master key
#[inline]
pub fn generate_key() -> VaultKey32 {
    VaultKey32::new(**RandomVaultKey32::new())
}

/// Encode a key for storage/transport
pub fn key_to_base64(key: &VaultKey32) -> String {
    STANDARD.encode(key.expose_secret())
}

/// Decode a base64 key, rejecting anything that is not exactly 32 bytes
pub fn key_from_base64(encoded: &str) -> Result<VaultKey32> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| VaultError::Key {
            reason: format!("not valid base64: {e}"),
        })?;
    if bytes.len() != KEY_LEN {
        return Err(VaultError::Key {
            reason: format!("expected {KEY_LEN} bytes, got {}", bytes.len()),
        });
    }
    let mut out = [0u8; KEY_LEN];
    out.copy_from_slice(&bytes);
    Ok(VaultKey32::new(out))
}
