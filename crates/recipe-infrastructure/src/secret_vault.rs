//! File-backed secret vault.
//!
//! One small JSON file per secret under the `secrets/` directory, written
//! with owner-only permissions. Secrets never leave the machine and are not
//! encrypted at rest.

use crate::storage::{blocking, AtomicFile};
use async_trait::async_trait;
use recipe_core::secret::SecretVault;
use recipe_core::{RecipeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Longest id accepted, in bytes. Keeps hex-encoded file names well under
/// common file name limits.
const MAX_ID_LEN: usize = 100;

#[derive(Serialize, Deserialize)]
struct SecretEntry {
    value: String,
}

/// Vault storing each secret in its own file.
///
/// File names are the hex encoding of the id, so arbitrary ids cannot
/// escape the vault directory or collide with each other. Operations are
/// serialized through one lock, giving last-write-wins per id.
#[derive(Clone)]
pub struct FileSecretVault {
    dir: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileSecretVault {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the file for `id`, or `None` if the id can never be stored.
    fn entry_file(&self, id: &str) -> Option<AtomicFile<SecretEntry>> {
        if id.is_empty() || id.len() > MAX_ID_LEN {
            return None;
        }
        let name = format!("{}.json", hex_encode(id.as_bytes()));
        Some(AtomicFile::json(self.dir.join(name)).private())
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
impl SecretVault for FileSecretVault {
    async fn get(&self, id: &str) -> Result<Option<String>> {
        let Some(file) = self.entry_file(id) else {
            return Ok(None);
        };

        let _guard = self.lock.lock().await;
        let entry = blocking(move || Ok(file.load()?)).await.map_err(|e| {
            // Keep the message free of file contents
            RecipeError::security(format!("Failed to read secret '{}': {}", id, kind_of(&e)))
        })?;
        Ok(entry.map(|e| e.value))
    }

    async fn set(&self, id: &str, value: &str) -> Result<()> {
        let file = self
            .entry_file(id)
            .ok_or_else(|| RecipeError::security(format!("Invalid secret id '{}'", id)))?;
        let entry = SecretEntry {
            value: value.to_string(),
        };

        let _guard = self.lock.lock().await;
        blocking(move || Ok(file.save(&entry)?)).await?;
        tracing::debug!("[SecretVault] Stored secret for '{}'", id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let Some(file) = self.entry_file(id) else {
            return Ok(());
        };

        let _guard = self.lock.lock().await;
        let removed = blocking(move || Ok(file.remove()?)).await?;
        if removed {
            tracing::debug!("[SecretVault] Deleted secret for '{}'", id);
        }
        Ok(())
    }
}

fn kind_of(err: &RecipeError) -> &'static str {
    if err.is_serialization() {
        "corrupt entry"
    } else if err.is_io() {
        "I/O failure"
    } else {
        "internal failure"
    }
}
