//! Folder repository trait.

use super::model::Folder;
use crate::error::Result;
use async_trait::async_trait;

/// Repository for the folder collection.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// Loads all folders in their stored order.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<Vec<Folder>>>;

    /// Replaces the stored collection with `folders`.
    async fn save(&self, folders: &[Folder]) -> Result<()>;
}
