use serde::{Deserialize, Serialize};

/// A named, ordered grouping of sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier (UUID format)
    pub id: String,
    pub name: String,
    /// Member session ids in insertion order. May contain ids of sessions
    /// that have since been closed; readers skip those.
    #[serde(default)]
    pub session_ids: Vec<String>,
}

impl Folder {
    pub fn contains(&self, session_id: &str) -> bool {
        self.session_ids.iter().any(|id| id == session_id)
    }
}
