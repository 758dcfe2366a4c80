// src/export.rs
//! Portable JSON export
//!
//! Listing callers only ever see metadata; plaintext leaves the vault
//! solely through `decrypt_secret` or an explicit `include_values` export.

use std::path::Path;

use chrono::Utc;
use serde_json::json;

use crate::consts::EXPORT_FORMAT;
use crate::error::Result;
use crate::store::{SecretFilter, SecretStore};

/// Export every record to a pretty-printed JSON document at `path`.
///
/// SECURITY WARNING: with `include_values` the output contains every
/// plaintext value. Protect it like nuclear launch codes.
pub fn export_to_json<P: AsRef<Path>>(
    store: &SecretStore,
    path: P,
    include_values: bool,
) -> Result<usize> {
    let secrets = store.list_secrets(&SecretFilter::default())?;

    let mut records = Vec::with_capacity(secrets.len());
    for secret in &secrets {
        let mut record = json!({
            "id": secret.id,
            "name": secret.name,
            "project": secret.project,
            "environment": secret.environment,
            "tags": secret.tags,
            "created_at": secret.created_at,
            "updated_at": secret.updated_at,
        });
        if include_values {
            record["value"] = json!(store.decrypt_secret(secret)?);
        }
        records.push(record);
    }

    let export = json!({
        "export_format": EXPORT_FORMAT,
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "total_secrets": records.len(),
        "warning": include_values
            .then_some("THIS FILE CONTAINS PLAINTEXT SECRETS. ENCRYPT OR DELETE IMMEDIATELY AFTER USE."),
        "secrets": records,
    });

    std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
    Ok(records.len())
}
