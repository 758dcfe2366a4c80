// src/rotate.rs
//! Master-key rotation
//!
//! Rotation re-encrypts every stored envelope under a new key inside one
//! transaction: either every record moves to the new key or none do. The
//! store rebinds to the new provider only after the commit.

use rusqlite::params;
use tracing::{info, instrument};

use crate::crypto::{rotate_envelope, CryptoProvider};
use crate::error::Result;
use crate::store::SecretStore;

impl SecretStore {
    /// Re-encrypt all records under `new_crypto` and rebind the store to it.
    /// Returns the number of records rotated. A single decryption failure
    /// (wrong old key, corrupted envelope) rolls the whole rotation back.
    #[instrument(skip_all)]
    pub fn rotate_key(&mut self, new_crypto: CryptoProvider) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut rotated = 0usize;
        {
            let mut select = tx.prepare("SELECT id, value_encrypted FROM secrets")?;
            let mut update =
                tx.prepare("UPDATE secrets SET value_encrypted = ?1 WHERE id = ?2")?;
            let rows = select.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            for row in rows {
                let (id, envelope) = row?;
                let reencrypted = rotate_envelope(&self.crypto, &new_crypto, &envelope)?;
                update.execute(params![reencrypted, id])?;
                rotated += 1;
            }
        }
        tx.commit()?;
        self.crypto = new_crypto;
        info!(rotated, "master key rotated");
        Ok(rotated)
    }
}
