//! Secret vault trait.
//!
//! Defines the interface for the local-only store of credentials keyed by
//! recipe (or session) id.

use crate::error::Result;

/// Local key-value store for sensitive strings.
///
/// # Security Note
///
/// Implementations must keep secrets on the local machine. They should:
/// - Restrict file permissions where the platform supports it (600 on Unix)
/// - Never log secret values or include them in error messages
///
/// Values are not encrypted at rest.
///
/// Each operation is atomic with respect to its id: concurrent writers
/// resolve last-write-wins and readers never observe a partial value.
#[async_trait::async_trait]
pub trait SecretVault: Send + Sync {
    /// Returns the secret for `id`, or `None` if none was set.
    async fn get(&self, id: &str) -> Result<Option<String>>;

    /// Creates or replaces the secret for `id`.
    async fn set(&self, id: &str, value: &str) -> Result<()>;

    /// Removes the secret for `id`. Removing an absent secret succeeds.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Checks whether a secret is stored for `id`.
    async fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }
}
