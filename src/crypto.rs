// src/crypto.rs
//! Authenticated encryption — no I/O, no database
//!
//! `CryptoProvider` turns plaintext strings into opaque envelopes and back.
//! An envelope is `{ version, nonce, data }` (the GCM tag rides at the end
//! of `data`), serialized as JSON and base64'd into a single string. The tag
//! gates all output: tampering with any part of an envelope makes decryption
//! fail, it never yields altered plaintext.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::aliases::VaultKey32;
use crate::consts::{ENVELOPE_VERSION, NONCE_LEN};
use crate::error::{Result, VaultError};
use crate::key_ops::{generate_key, key_from_base64, key_to_base64};

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    nonce: String,
    data: String,
}

/// AES-256-GCM provider bound to one master key
pub struct CryptoProvider {
    cipher: Aes256Gcm,
}

impl CryptoProvider {
    /// Build a provider from raw key material
    pub fn new(key: &VaultKey32) -> Result<Self> {
        let cipher =
            Aes256Gcm::new_from_slice(key.expose_secret().as_slice()).map_err(|e| {
                VaultError::Key {
                    reason: e.to_string(),
                }
            })?;
        Ok(Self { cipher })
    }

    /// Build a provider from the base64 key form used in config/env
    pub fn from_base64(encoded: &str) -> Result<Self> {
        Self::new(&key_from_base64(encoded)?)
    }

    /// Generate a fresh master key in its base64 transport form
    pub fn generate_key_base64() -> String {
        key_to_base64(&generate_key())
    }

    /// Encrypt a plaintext into a self-describing envelope string.
    ///
    /// A fresh nonce is drawn per call, so equal inputs produce distinct
    /// envelopes. Any input works, including the empty string.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let data = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| VaultError::Encryption {
                reason: e.to_string(),
            })?;
        let envelope = Envelope {
            version: ENVELOPE_VERSION,
            nonce: STANDARD.encode(nonce.as_slice()),
            data: STANDARD.encode(&data),
        };
        let json = serde_json::to_vec(&envelope).map_err(|e| VaultError::Encryption {
            reason: e.to_string(),
        })?;
        Ok(STANDARD.encode(json))
    }

    /// Decrypt an envelope produced by `encrypt`.
    ///
    /// Fails when the envelope is malformed, declares an unknown scheme
    /// version, or the authentication tag does not verify (wrong key or
    /// tampered nonce/ciphertext).
    pub fn decrypt(&self, envelope: &str) -> Result<String> {
        let json = STANDARD
            .decode(envelope)
            .map_err(|e| malformed(format!("outer base64: {e}")))?;
        let envelope: Envelope = serde_json::from_slice(&json)
            .map_err(|e| malformed(format!("envelope JSON: {e}")))?;
        if envelope.version != ENVELOPE_VERSION {
            return Err(VaultError::UnsupportedVersion {
                version: envelope.version,
            });
        }
        let nonce = STANDARD
            .decode(&envelope.nonce)
            .map_err(|e| malformed(format!("nonce: {e}")))?;
        if nonce.len() != NONCE_LEN {
            return Err(malformed(format!(
                "nonce is {} bytes, expected {NONCE_LEN}",
                nonce.len()
            )));
        }
        let data = STANDARD
            .decode(&envelope.data)
            .map_err(|e| malformed(format!("ciphertext: {e}")))?;
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(&nonce), data.as_slice())
            .map_err(|_| VaultError::Decryption {
                reason: "authentication failed (wrong key or tampered data)".into(),
            })?;
        String::from_utf8(plaintext).map_err(|e| VaultError::Decryption {
            reason: format!("plaintext is not UTF-8: {e}"),
        })
    }
}

/// Pure envelope rotation — decrypt under `old`, re-encrypt under `new`.
/// No database involvement.
pub fn rotate_envelope(
    old: &CryptoProvider,
    new: &CryptoProvider,
    envelope: &str,
) -> Result<String> {
    new.encrypt(&old.decrypt(envelope)?)
}

fn malformed(reason: String) -> VaultError {
    VaultError::Decryption {
        reason: format!("malformed envelope: {reason}"),
    }
}
