//! Session repository trait.
//!
//! Defines the interface for persisting the session collection.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Everything the session registry persists: the ordered sessions and the
/// current pointer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub current_session_id: Option<String>,
}

/// An abstract repository for the session collection.
///
/// The whole collection is read and written at once. Implementations own
/// the durable store; nothing else writes to it.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the persisted snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(snapshot))`: A snapshot was stored
    /// - `Ok(None)`: Nothing stored yet (first run)
    /// - `Err(_)`: The store exists but could not be read
    async fn load(&self) -> Result<Option<SessionSnapshot>>;

    /// Replaces the stored snapshot with `snapshot`.
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;
}
