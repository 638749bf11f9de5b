//! File-backed SessionRepository implementation.

use crate::storage::{blocking, AtomicFile};
use recipe_core::session::{SessionRepository, SessionSnapshot};
use recipe_core::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Stores the whole session snapshot in one JSON document.
///
/// Each save replaces the document atomically, so a reader after a crash
/// sees the last complete snapshot.
#[derive(Clone)]
pub struct FileSessionRepository {
    file: Arc<AtomicFile<SessionSnapshot>>,
}

impl FileSessionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::json(path)),
        }
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn load(&self) -> Result<Option<SessionSnapshot>> {
        let file = self.file.clone();
        let snapshot = blocking(move || Ok(file.load()?)).await?;
        tracing::debug!(
            "[SessionRepository] Loaded {} sessions",
            snapshot.as_ref().map_or(0, |s| s.sessions.len())
        );
        Ok(snapshot)
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let file = self.file.clone();
        let snapshot = snapshot.clone();
        blocking(move || Ok(file.save(&snapshot)?)).await
    }
}
