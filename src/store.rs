// src/store.rs
//! Durable CRUD over secret records
//!
//! `SecretStore` owns the SQLite handle and the bound `CryptoProvider`:
//! values are encrypted before they reach a statement and only come back as
//! plaintext through an explicit `decrypt_secret` call. Identity uniqueness
//! lives in the UNIQUE constraint, so concurrent creates of the same triple
//! are decided by the storage engine, never by a read-then-write check.
//!
//! Fixed-shape statements go through `prepare_cached`, which keys the
//! compiled statement by SQL text; parameters stay late-bound.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rand::RngCore;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use tracing::{debug, instrument};

use crate::consts::ID_LEN_BYTES;
use crate::crypto::CryptoProvider;
use crate::error::{Result, VaultError};

/// One stored secret. `value_encrypted` is opaque outside `CryptoProvider`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    pub id: String,
    pub name: String,
    pub project: String,
    pub environment: String,
    pub tags: Vec<String>,
    pub value_encrypted: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Listing filter. Supplied dimensions are ANDed; omitted ones match all.
#[derive(Debug, Clone, Default)]
pub struct SecretFilter {
    pub project: Option<String>,
    pub environment: Option<String>,
    pub tags: Option<Vec<String>>,
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS secrets (
    id              TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    project         TEXT NOT NULL,
    environment     TEXT NOT NULL,
    tags            TEXT NOT NULL,
    value_encrypted TEXT NOT NULL,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    UNIQUE (name, project, environment)
);

CREATE INDEX IF NOT EXISTS idx_secrets_project_env ON secrets(project, environment);
CREATE INDEX IF NOT EXISTS idx_secrets_name ON secrets(name);
"#;

pub struct SecretStore {
    pub(crate) conn: Connection,
    pub(crate) crypto: CryptoProvider,
}

impl SecretStore {
    /// Open (or create) a store at `path`, bound to `crypto`
    pub fn open<P: AsRef<Path>>(path: P, crypto: CryptoProvider) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            let _ = fs::create_dir_all(parent);
        }
        Self::init(Connection::open(path)?, crypto)
    }

    /// In-memory store for tests and ephemeral callers
    pub fn open_in_memory(crypto: CryptoProvider) -> Result<Self> {
        Self::init(Connection::open_in_memory()?, crypto)
    }

    fn init(conn: Connection, crypto: CryptoProvider) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, crypto })
    }

    /// Encrypt and persist a new secret. The identity triple must be unused.
    #[instrument(skip(self, value, tags))]
    pub fn add_secret(
        &self,
        name: &str,
        value: &str,
        project: &str,
        environment: &str,
        tags: &[String],
    ) -> Result<Secret> {
        let now = now_rfc3339();
        let secret = Secret {
            id: new_secret_id(),
            name: name.to_string(),
            project: project.to_string(),
            environment: environment.to_string(),
            tags: dedup_tags(tags),
            value_encrypted: self.crypto.encrypt(value)?,
            created_at: now.clone(),
            updated_at: now,
        };
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO secrets (id, name, project, environment, tags, value_encrypted, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        stmt.execute(params![
            secret.id,
            secret.name,
            secret.project,
            secret.environment,
            serde_json::to_string(&secret.tags)?,
            secret.value_encrypted,
            secret.created_at,
            secret.updated_at,
        ])
        .map_err(|e| conflict_on_unique(e, name, project, environment))?;
        debug!(id = %secret.id, "secret added");
        Ok(secret)
    }

    /// Point lookup. Absence is a normal outcome, not an error.
    pub fn get_secret(&self, id: &str) -> Result<Option<Secret>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, project, environment, tags, value_encrypted, created_at, updated_at
             FROM secrets WHERE id = ?1",
        )?;
        let raw = stmt.query_row([id], |row| RawRow::from_row(row)).optional()?;
        raw.map(RawRow::into_secret).transpose()
    }

    /// Lookup by the natural key
    pub fn get_secret_by_name(
        &self,
        name: &str,
        project: &str,
        environment: &str,
    ) -> Result<Option<Secret>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, project, environment, tags, value_encrypted, created_at, updated_at
             FROM secrets WHERE name = ?1 AND project = ?2 AND environment = ?3",
        )?;
        let raw = stmt
            .query_row([name, project, environment], |row| RawRow::from_row(row))
            .optional()?;
        raw.map(RawRow::into_secret).transpose()
    }

    /// List records matching every supplied filter dimension, newest first.
    ///
    /// Project and environment are matched by the database. A tag matches
    /// when the record's tag set intersects the requested set, tested
    /// in memory on the deserialized list — one tag's text being a
    /// substring of another's can never cause a false match.
    pub fn list_secrets(&self, filter: &SecretFilter) -> Result<Vec<Secret>> {
        let mut sql = String::from(
            "SELECT id, name, project, environment, tags, value_encrypted, created_at, updated_at
             FROM secrets",
        );
        let mut clauses: Vec<&str> = Vec::new();
        let mut bind: Vec<&dyn rusqlite::ToSql> = Vec::new();
        if let Some(project) = &filter.project {
            clauses.push("project = ?");
            bind.push(project);
        }
        if let Some(environment) = &filter.environment {
            clauses.push("environment = ?");
            bind.push(environment);
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC, rowid DESC");

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(bind.as_slice(), |row| RawRow::from_row(row))?;
        let mut secrets = Vec::new();
        for raw in rows {
            secrets.push(raw?.into_secret()?);
        }

        if let Some(requested) = &filter.tags {
            if !requested.is_empty() {
                let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();
                secrets.retain(|s| s.tags.iter().any(|t| wanted.contains(t.as_str())));
            }
        }
        Ok(secrets)
    }

    /// Re-encrypt a new value in place. Identity fields and `created_at`
    /// never move; only `value_encrypted` and `updated_at` change.
    #[instrument(skip(self, new_value))]
    pub fn update_secret(&self, id: &str, new_value: &str) -> Result<Secret> {
        let value_encrypted = self.crypto.encrypt(new_value)?;
        let mut stmt = self.conn.prepare_cached(
            "UPDATE secrets SET value_encrypted = ?1, updated_at = ?2 WHERE id = ?3",
        )?;
        let changed = stmt.execute(params![value_encrypted, now_rfc3339(), id])?;
        if changed == 0 {
            return Err(VaultError::NotFound { id: id.to_string() });
        }
        debug!(id, "secret value updated");
        self.get_secret(id)?.ok_or_else(|| VaultError::NotFound {
            id: id.to_string(),
        })
    }

    /// Idempotent delete — removing an absent id is a no-op
    #[instrument(skip(self))]
    pub fn delete_secret(&self, id: &str) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare_cached("DELETE FROM secrets WHERE id = ?1")?;
        let removed = stmt.execute([id])?;
        debug!(id, removed, "secret deleted");
        Ok(())
    }

    /// Recover the plaintext of a previously fetched record.
    /// Decryption errors propagate unchanged.
    pub fn decrypt_secret(&self, secret: &Secret) -> Result<String> {
        self.crypto.decrypt(&secret.value_encrypted)
    }

    /// Release the underlying handle. Consuming `self` makes use-after-close
    /// unrepresentable.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| VaultError::Sql(e))
    }
}

/// Raw row image — all columns as stored, validated on conversion
struct RawRow {
    id: String,
    name: String,
    project: String,
    environment: String,
    tags: String,
    value_encrypted: String,
    created_at: String,
    updated_at: String,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            project: row.get(2)?,
            environment: row.get(3)?,
            tags: row.get(4)?,
            value_encrypted: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn into_secret(self) -> Result<Secret> {
        let tags: Vec<String> =
            serde_json::from_str(&self.tags).map_err(|e| VaultError::CorruptRecord {
                id: self.id.clone(),
                reason: format!("tags column is not a JSON array: {e}"),
            })?;
        Ok(Secret {
            id: self.id,
            name: self.name,
            project: self.project,
            environment: self.environment,
            tags,
            value_encrypted: self.value_encrypted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn conflict_on_unique(
    err: rusqlite::Error,
    name: &str,
    project: &str,
    environment: &str,
) -> VaultError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            VaultError::Conflict {
                name: name.to_string(),
                project: project.to_string(),
                environment: environment.to_string(),
            }
        }
        _ => VaultError::Sql(err),
    }
}

fn new_secret_id() -> String {
    let mut bytes = [0u8; ID_LEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Tags are an ordered set: first occurrence wins
fn dedup_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}
