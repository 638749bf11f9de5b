//! In-memory session registry.
//!
//! Owns the ordered session set and the current-session pointer. Every
//! operation is total: ids that are not present are ignored rather than
//! reported, since interactive deletes race with each other.

use super::model::{EditorState, PartialSession, Session};
use super::repository::SessionSnapshot;
use std::collections::HashSet;
use uuid::Uuid;

/// Ordered set of sessions plus the current-session pointer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRegistry {
    /// Sessions in insertion order
    sessions: Vec<Session>,
    /// Id of the session being edited. Not validated against `sessions`.
    current_id: Option<String>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from a persisted snapshot.
    ///
    /// Duplicate ids in the snapshot keep their first occurrence.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let mut seen = HashSet::new();
        let sessions = snapshot
            .sessions
            .into_iter()
            .filter(|s| seen.insert(s.id.clone()))
            .collect();

        Self {
            sessions,
            current_id: snapshot.current_session_id,
        }
    }

    /// Returns the full state as a snapshot suitable for persistence.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            sessions: self.sessions.clone(),
            current_session_id: self.current_id.clone(),
        }
    }

    /// Creates a new session from an optional template and appends it.
    ///
    /// The id is always freshly generated. The current pointer is left
    /// untouched; callers decide whether the new session becomes current.
    pub fn create_session(&mut self, based_on: Option<PartialSession>) -> Session {
        let template = based_on.unwrap_or_default();

        let session = Session {
            id: Uuid::new_v4().to_string(),
            name: template.name.unwrap_or_default(),
            recipe_id: template
                .recipe_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            method: template.method.unwrap_or_default(),
            editor: template.editor.unwrap_or_default(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.sessions.push(session.clone());
        session
    }

    /// Renames a session. Returns `false` if the id is unknown.
    pub fn update_name(&mut self, session_id: &str, new_name: impl Into<String>) -> bool {
        match self.get_mut(session_id) {
            Some(session) => {
                session.name = new_name.into();
                true
            }
            None => false,
        }
    }

    /// Replaces a session's editor state. Returns `false` if the id is unknown.
    pub fn update_editor(&mut self, session_id: &str, editor: EditorState) -> bool {
        match self.get_mut(session_id) {
            Some(session) => {
                session.editor = editor;
                true
            }
            None => false,
        }
    }

    /// Removes a session.
    ///
    /// If the closed session was current, the pointer moves to the session
    /// that followed it, or to the one before it when it was last, or to
    /// nothing when the registry is now empty. The new current session is
    /// returned in that case so the caller can load its editor state.
    /// Otherwise, including when the id is unknown, returns `None`.
    pub fn close_session(&mut self, session_id: &str) -> Option<Session> {
        let index = self.position(session_id)?;
        self.sessions.remove(index);

        if self.current_id.as_deref() != Some(session_id) {
            return None;
        }

        let replacement = self
            .sessions
            .get(index)
            .or_else(|| index.checked_sub(1).and_then(|i| self.sessions.get(i)))
            .cloned();

        self.current_id = replacement.as_ref().map(|s| s.id.clone());
        replacement
    }

    /// Removes several sessions at once.
    ///
    /// The replacement rule of [`close_session`](Self::close_session) is
    /// applied once, after every removal, relative to the old current
    /// session's original position. Returns the new current session when
    /// the current one was among the closed ids.
    pub fn close_sessions<I, S>(&mut self, ids: I) -> Option<Session>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doomed: HashSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        if doomed.is_empty() {
            return None;
        }

        let current_pos = self
            .current_id
            .as_deref()
            .filter(|id| doomed.contains(*id))
            .and_then(|id| self.position(id));

        let original = std::mem::take(&mut self.sessions);
        let mut after = None;
        let mut before = None;
        for (index, session) in original.into_iter().enumerate() {
            if doomed.contains(&session.id) {
                continue;
            }
            if let Some(pos) = current_pos {
                if index > pos && after.is_none() {
                    after = Some(session.id.clone());
                } else if index < pos {
                    before = Some(session.id.clone());
                }
            }
            self.sessions.push(session);
        }

        current_pos?;
        self.current_id = after.or(before);
        self.current().cloned()
    }

    /// Sets the current pointer without checking that the session exists.
    pub fn set_current(&mut self, session_id: Option<String>) {
        self.current_id = session_id;
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// Returns the current session, or `None` if the pointer is unset or
    /// refers to a session that is not in the registry.
    pub fn current(&self) -> Option<&Session> {
        self.current_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    fn get_mut(&mut self, session_id: &str) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == session_id)
    }

    fn position(&self, session_id: &str) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == session_id)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.position(session_id).is_some()
    }

    /// All sessions in insertion order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::HttpMethod;

    fn registry_with(names: &[&str]) -> (SessionRegistry, Vec<String>) {
        let mut registry = SessionRegistry::new();
        let ids = names
            .iter()
            .map(|name| registry.create_session(Some(PartialSession::named(*name))).id)
            .collect();
        (registry, ids)
    }

    #[test]
    fn test_create_session_ids_are_distinct() {
        let mut registry = SessionRegistry::new();
        let ids: HashSet<String> = (0..50)
            .map(|_| registry.create_session(None).id)
            .collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(registry.len(), 50);
    }

    #[test]
    fn test_create_session_copies_template_and_leaves_current() {
        let mut registry = SessionRegistry::new();
        let session = registry.create_session(Some(
            PartialSession::named("Create charge")
                .with_method(HttpMethod::Post)
                .with_recipe_id("recipe-1"),
        ));

        assert_eq!(session.name, "Create charge");
        assert_eq!(session.method, HttpMethod::Post);
        assert_eq!(session.recipe_id, "recipe-1");
        assert!(registry.current_id().is_none());
    }

    #[test]
    fn test_create_session_without_template_generates_recipe_id() {
        let mut registry = SessionRegistry::new();
        let a = registry.create_session(None);
        let b = registry.create_session(None);
        assert!(!a.recipe_id.is_empty());
        assert_ne!(a.recipe_id, b.recipe_id);
        assert_ne!(a.recipe_id, a.id);
        assert_eq!(a.method, HttpMethod::Get);
    }

    #[test]
    fn test_update_name_and_editor() {
        let (mut registry, ids) = registry_with(&["a"]);
        assert!(registry.update_name(&ids[0], "renamed"));
        assert!(!registry.update_name("missing", "x"));

        let editor = EditorState {
            url: serde_json::json!("https://api.example.com/v1/users"),
            ..EditorState::default()
        };
        assert!(registry.update_editor(&ids[0], editor.clone()));
        let session = registry.get(&ids[0]).unwrap();
        assert_eq!(session.name, "renamed");
        assert_eq!(session.editor, editor);
    }

    #[test]
    fn test_close_current_walks_forward_then_back() {
        let (mut registry, ids) = registry_with(&["A", "B", "C"]);
        let (a, b, c) = (&ids[0], &ids[1], &ids[2]);
        registry.set_current(Some(b.clone()));

        let next = registry.close_session(b).unwrap();
        assert_eq!(&next.id, c);
        assert_eq!(registry.current_id(), Some(c.as_str()));

        let next = registry.close_session(c).unwrap();
        assert_eq!(&next.id, a);

        assert!(registry.close_session(a).is_none());
        assert!(registry.current_id().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_close_non_current_keeps_pointer() {
        let (mut registry, ids) = registry_with(&["A", "B"]);
        registry.set_current(Some(ids[0].clone()));

        assert!(registry.close_session(&ids[1]).is_none());
        assert_eq!(registry.current_id(), Some(ids[0].as_str()));
    }

    #[test]
    fn test_close_missing_is_noop() {
        let (mut registry, ids) = registry_with(&["A"]);
        registry.set_current(Some(ids[0].clone()));
        assert!(registry.close_session("nope").is_none());
        registry.close_session(&ids[0]);
        // Double close must not panic or change anything.
        assert!(registry.close_session(&ids[0]).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_close_sessions_picks_replacement_once() {
        let (mut registry, ids) = registry_with(&["A", "B", "C", "D", "E"]);
        registry.set_current(Some(ids[1].clone()));

        let next = registry.close_sessions([&ids[1], &ids[2]]).unwrap();
        assert_eq!(next.id, ids[3]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_close_sessions_falls_back_to_previous() {
        let (mut registry, ids) = registry_with(&["A", "B", "C"]);
        registry.set_current(Some(ids[1].clone()));

        let next = registry.close_sessions(vec![ids[1].clone(), ids[2].clone()]).unwrap();
        assert_eq!(next.id, ids[0]);
    }

    #[test]
    fn test_close_sessions_all_clears_current() {
        let (mut registry, ids) = registry_with(&["A", "B"]);
        registry.set_current(Some(ids[0].clone()));

        assert!(registry.close_sessions(&ids).is_none());
        assert!(registry.current_id().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_close_sessions_without_current_keeps_pointer() {
        let (mut registry, ids) = registry_with(&["A", "B", "C"]);
        registry.set_current(Some(ids[0].clone()));

        assert!(registry.close_sessions([ids[2].as_str(), "ghost"]).is_none());
        assert_eq!(registry.current_id(), Some(ids[0].as_str()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_set_current_is_permissive() {
        let mut registry = SessionRegistry::new();
        registry.set_current(Some("not-yet-persisted".to_string()));
        assert_eq!(registry.current_id(), Some("not-yet-persisted"));
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_snapshot_round_trip_dedupes() {
        let (mut registry, ids) = registry_with(&["A", "B"]);
        registry.set_current(Some(ids[1].clone()));

        let mut snapshot = registry.snapshot();
        snapshot.sessions.push(snapshot.sessions[0].clone());

        let restored = SessionRegistry::from_snapshot(snapshot);
        assert_eq!(restored, registry);
    }
}
