// tests/support.rs
//! Test fixture — a fresh store in a temp directory under a fresh random key

use std::path::PathBuf;

use envault::{CryptoProvider, Secret, SecretStore};
use tempfile::TempDir;

pub struct TestVault {
    pub store: SecretStore,
    pub key_b64: String,
    dir: TempDir,
}

impl TestVault {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let key_b64 = CryptoProvider::generate_key_base64();
        let crypto = CryptoProvider::from_base64(&key_b64).expect("build provider");
        let store = SecretStore::open(dir.path().join("secrets.db"), crypto).expect("open store");
        Self {
            store,
            key_b64,
            dir,
        }
    }

    #[allow(dead_code)]
    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("secrets.db")
    }

    #[allow(dead_code)]
    pub fn export_path(&self) -> PathBuf {
        self.dir.path().join("export.json")
    }

    /// A second provider bound to the same key
    #[allow(dead_code)]
    pub fn provider(&self) -> CryptoProvider {
        CryptoProvider::from_base64(&self.key_b64).expect("build provider")
    }

    /// Shorthand for tagged inserts
    #[allow(dead_code)]
    pub fn add(&self, name: &str, value: &str, project: &str, environment: &str) -> Secret {
        self.store
            .add_secret(name, value, project, environment, &[])
            .expect("add secret")
    }

    #[allow(dead_code)]
    pub fn add_tagged(
        &self,
        name: &str,
        value: &str,
        project: &str,
        environment: &str,
        tags: &[&str],
    ) -> Secret {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        self.store
            .add_secret(name, value, project, environment, &tags)
            .expect("add secret")
    }
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}
