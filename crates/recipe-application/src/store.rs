//! Playground state container.
//!
//! `PlaygroundStore` owns the session and folder registries, applies every
//! mutation in memory first, then hands a full snapshot of the affected
//! collection to its write-through queue. Listeners learn about changes
//! through a broadcast channel.

use crate::persistence::{Committed, PendingWrite, WriteQueue};
use recipe_core::catalog::Recipe;
use recipe_core::folder::{Folder, FolderRegistry, FolderRepository, SessionTree};
use recipe_core::session::{
    EditorState, PartialSession, Session, SessionRegistry, SessionRepository, SessionSnapshot,
    PLAYGROUND_SESSION_ID,
};
use recipe_core::Result;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Broadcast buffer used by [`PlaygroundStore::load`].
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Change notifications sent to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The session list or a session's contents changed
    SessionsChanged,
    /// Folder records or membership changed
    FoldersChanged,
    /// The current pointer moved
    CurrentChanged(Option<String>),
}

/// How a duplicated session relates to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateMode {
    /// Independent copy with its own recipe id (own auth config and secret)
    #[default]
    Simple,
    /// Shares the source's recipe id, and with it the auth config and secret
    Linked,
}

/// The single source of truth for sessions, folders and the current
/// session pointer.
///
/// All mutations take `&mut self` and complete synchronously in memory.
/// Persistence is asynchronous and never rolls the in-memory state back.
pub struct PlaygroundStore {
    sessions: SessionRegistry,
    folders: FolderRegistry,
    /// Transient session for a recipe opened directly; never persisted
    playground: Option<Session>,
    session_writes: WriteQueue<SessionSnapshot>,
    folder_writes: WriteQueue<Vec<Folder>>,
    events: broadcast::Sender<StoreEvent>,
}

impl PlaygroundStore {
    /// Loads both collections and starts the write-through tasks.
    ///
    /// Missing stores load as empty collections.
    pub async fn load(
        session_repository: Arc<dyn SessionRepository>,
        folder_repository: Arc<dyn FolderRepository>,
    ) -> Result<Self> {
        Self::load_with_capacity(session_repository, folder_repository, DEFAULT_EVENT_CAPACITY)
            .await
    }

    pub async fn load_with_capacity(
        session_repository: Arc<dyn SessionRepository>,
        folder_repository: Arc<dyn FolderRepository>,
        event_capacity: usize,
    ) -> Result<Self> {
        let snapshot = session_repository.load().await?.unwrap_or_default();
        let folders = folder_repository.load().await?.unwrap_or_default();

        let sessions = SessionRegistry::from_snapshot(snapshot);
        let folders = FolderRegistry::from_folders(folders);
        tracing::info!(
            "[Store] Loaded {} sessions, {} folders",
            sessions.len(),
            folders.folders().len()
        );

        let (events, _) = broadcast::channel(event_capacity.max(1));

        Ok(Self {
            sessions,
            folders,
            playground: None,
            session_writes: WriteQueue::spawn("sessions", session_repository),
            folder_writes: WriteQueue::spawn("folders", folder_repository),
            events,
        })
    }

    /// Receives every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Writes both collections and waits until they are durable.
    pub async fn flush(&self) -> Result<()> {
        self.persist_sessions()
            .join(self.persist_folders())
            .persisted()
            .await
    }

    // Queries

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn folders(&self) -> &FolderRegistry {
        &self.folders
    }

    /// Looks a session up by id, including the transient playground session.
    pub fn session(&self, session_id: &str) -> Option<&Session> {
        if session_id == PLAYGROUND_SESSION_ID {
            return self.playground.as_ref();
        }
        self.sessions.get(session_id)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.sessions.current_id()
    }

    /// The session being edited, if the pointer resolves.
    pub fn current_session(&self) -> Option<&Session> {
        self.current_id().and_then(|id| self.session(id))
    }

    /// Sessions grouped by folder for display.
    pub fn sidebar(&self) -> SessionTree {
        self.folders.group_sessions(&self.sessions)
    }

    // Session registry operations

    /// Creates a session. The current pointer is left as is.
    pub fn create_session(&mut self, template: Option<PartialSession>) -> Committed<Session> {
        let session = self.sessions.create_session(template);
        tracing::debug!("[Store] Created session {}", session.id);
        self.notify(StoreEvent::SessionsChanged);
        Committed::new(session, self.persist_sessions())
    }

    pub fn update_name(&mut self, session_id: &str, new_name: impl Into<String>) -> Committed<bool> {
        if !self.sessions.update_name(session_id, new_name) {
            return Committed::unchanged(false);
        }
        self.notify(StoreEvent::SessionsChanged);
        Committed::new(true, self.persist_sessions())
    }

    /// Replaces a session's editor state.
    ///
    /// Editing the playground session only changes it in memory.
    pub fn update_editor(&mut self, session_id: &str, editor: EditorState) -> Committed<bool> {
        if session_id == PLAYGROUND_SESSION_ID {
            return match self.playground.as_mut() {
                Some(session) => {
                    session.editor = editor;
                    Committed::unchanged(true)
                }
                None => Committed::unchanged(false),
            };
        }

        if !self.sessions.update_editor(session_id, editor) {
            return Committed::unchanged(false);
        }
        self.notify(StoreEvent::SessionsChanged);
        Committed::new(true, self.persist_sessions())
    }

    /// Closes one session; returns the new current session if the closed
    /// one was current.
    pub fn close_session(&mut self, session_id: &str) -> Committed<Option<Session>> {
        if !self.sessions.contains(session_id) {
            return Committed::unchanged(None);
        }

        let before = self.current_id().map(str::to_string);
        let replacement = self.sessions.close_session(session_id);
        tracing::debug!("[Store] Closed session {}", session_id);

        self.notify(StoreEvent::SessionsChanged);
        self.notify_current_if_moved(before);
        Committed::new(replacement, self.persist_sessions())
    }

    /// Closes several sessions, choosing at most one replacement.
    pub fn close_sessions<I, S>(&mut self, session_ids: I) -> Committed<Option<Session>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<String> = session_ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .filter(|id| self.sessions.contains(id))
            .collect();
        if ids.is_empty() {
            return Committed::unchanged(None);
        }

        let before = self.current_id().map(str::to_string);
        let replacement = self.sessions.close_sessions(&ids);
        tracing::debug!("[Store] Closed {} sessions", ids.len());

        self.notify(StoreEvent::SessionsChanged);
        self.notify_current_if_moved(before);
        Committed::new(replacement, self.persist_sessions())
    }

    /// Moves the current pointer. The id is not validated.
    pub fn set_current(&mut self, session_id: Option<String>) -> Committed<()> {
        if session_id.as_deref() != Some(PLAYGROUND_SESSION_ID) {
            self.playground = None;
        }
        if self.current_id() == session_id.as_deref() {
            return Committed::unchanged(());
        }

        self.sessions.set_current(session_id.clone());
        self.notify(StoreEvent::CurrentChanged(session_id));
        Committed::new((), self.persist_sessions())
    }

    // Folder registry operations

    pub fn add_folder(&mut self, name: impl Into<String>) -> Committed<Folder> {
        let folder = self.folders.add_folder(name);
        tracing::debug!("[Store] Added folder {}", folder.id);
        self.notify(StoreEvent::FoldersChanged);
        Committed::new(folder, self.persist_folders())
    }

    pub fn rename_folder(&mut self, folder_id: &str, new_name: impl Into<String>) -> Committed<bool> {
        if !self.folders.rename_folder(folder_id, new_name) {
            return Committed::unchanged(false);
        }
        self.notify(StoreEvent::FoldersChanged);
        Committed::new(true, self.persist_folders())
    }

    /// Removes the folder record only; member sessions stay open.
    pub fn remove_folder(&mut self, folder_id: &str) -> Committed<Option<Folder>> {
        let Some(folder) = self.folders.remove_folder(folder_id) else {
            return Committed::unchanged(None);
        };
        self.notify(StoreEvent::FoldersChanged);
        Committed::new(Some(folder), self.persist_folders())
    }

    /// Files a session into a folder. Unknown sessions and folders are ignored.
    pub fn add_session_to_folder(&mut self, session_id: &str, folder_id: &str) -> Committed<bool> {
        if !self.sessions.contains(session_id) {
            return Committed::unchanged(false);
        }
        if !self.folders.add_session_to_folder(session_id, folder_id) {
            return Committed::unchanged(false);
        }
        self.notify(StoreEvent::FoldersChanged);
        Committed::new(true, self.persist_folders())
    }

    pub fn remove_session_from_folder(&mut self, session_id: &str) -> Committed<bool> {
        if !self.folders.remove_session_from_folder(session_id) {
            return Committed::unchanged(false);
        }
        self.notify(StoreEvent::FoldersChanged);
        Committed::new(true, self.persist_folders())
    }

    // Workflows

    /// Creates an empty request, makes it current and optionally files it.
    pub fn new_request(&mut self, folder_id: Option<&str>) -> Committed<Session> {
        self.new_request_from(None, folder_id)
    }

    /// Like [`new_request`](Self::new_request), starting from a template.
    pub fn new_request_from(
        &mut self,
        template: Option<PartialSession>,
        folder_id: Option<&str>,
    ) -> Committed<Session> {
        let session = self.sessions.create_session(template);
        self.playground = None;
        self.sessions.set_current(Some(session.id.clone()));
        self.notify(StoreEvent::SessionsChanged);
        self.notify(StoreEvent::CurrentChanged(Some(session.id.clone())));

        let mut write = self.persist_sessions();
        if let Some(folder_id) = folder_id {
            if self.folders.add_session_to_folder(&session.id, folder_id) {
                self.notify(StoreEvent::FoldersChanged);
                write = write.join(self.persist_folders());
            } else {
                tracing::warn!(
                    "[Store] Folder {} not found; new request left unfiled",
                    folder_id
                );
            }
        }

        Committed::new(session, write)
    }

    /// Copies a session under a new id and makes the copy current.
    ///
    /// `name` defaults to `"<source name> copy"`. Returns `None` when the
    /// source does not exist.
    pub fn duplicate_session(
        &mut self,
        session_id: &str,
        name: Option<String>,
        mode: DuplicateMode,
    ) -> Committed<Option<Session>> {
        let Some(source) = self.session(session_id) else {
            return Committed::unchanged(None);
        };

        let mut template = PartialSession::from(source);
        template.name = Some(name.unwrap_or_else(|| format!("{} copy", source.name)));
        if mode == DuplicateMode::Simple {
            // Fresh recipe id, generated by the registry
            template.recipe_id = None;
        }

        let copy = self.sessions.create_session(Some(template));
        self.playground = None;
        self.sessions.set_current(Some(copy.id.clone()));
        tracing::debug!(
            "[Store] Duplicated session {} as {} ({:?})",
            session_id,
            copy.id,
            mode
        );

        self.notify(StoreEvent::SessionsChanged);
        self.notify(StoreEvent::CurrentChanged(Some(copy.id.clone())));
        Committed::new(Some(copy), self.persist_sessions())
    }

    /// Starts a persistent session from a catalog recipe and makes it current.
    pub fn fork_recipe(&mut self, recipe: &Recipe) -> Committed<Session> {
        let session = self.sessions.create_session(Some(
            PartialSession::named(recipe.title.clone())
                .with_method(recipe.method)
                .with_recipe_id(recipe.id.clone()),
        ));
        self.playground = None;
        self.sessions.set_current(Some(session.id.clone()));
        tracing::info!("[Store] Forked recipe {} into session {}", recipe.id, session.id);

        self.notify(StoreEvent::SessionsChanged);
        self.notify(StoreEvent::CurrentChanged(Some(session.id.clone())));
        Committed::new(session, self.persist_sessions())
    }

    /// Shows a catalog recipe in the transient playground session.
    ///
    /// The playground session becomes current but is never added to the
    /// session list. Duplicate it to keep it.
    pub fn open_recipe(&mut self, recipe: &Recipe) -> Committed<Session> {
        let session = Session {
            id: PLAYGROUND_SESSION_ID.to_string(),
            name: recipe.title.clone(),
            recipe_id: recipe.id.clone(),
            method: recipe.method,
            editor: EditorState::default(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.playground = Some(session.clone());

        if self.current_id() == Some(PLAYGROUND_SESSION_ID) {
            // Pointer unchanged, contents replaced
            self.notify(StoreEvent::CurrentChanged(Some(session.id.clone())));
            return Committed::unchanged(session);
        }

        self.sessions.set_current(Some(session.id.clone()));
        self.notify(StoreEvent::CurrentChanged(Some(session.id.clone())));
        Committed::new(session, self.persist_sessions())
    }

    /// Closes a session and drops it from its folder.
    pub fn delete_session(&mut self, session_id: &str) -> Committed<Option<Session>> {
        let closed = self.close_session(session_id);
        let mut write = closed.write;

        if self.folders.remove_session_from_folder(session_id) {
            self.notify(StoreEvent::FoldersChanged);
            write = write.join(self.persist_folders());
        }

        Committed::new(closed.value, write)
    }

    /// Removes a folder. With `cascade`, its member sessions are closed too.
    pub fn delete_folder(&mut self, folder_id: &str, cascade: bool) -> Committed<Option<Folder>> {
        let removed = self.remove_folder(folder_id);
        let Some(folder) = removed.value else {
            return Committed::unchanged(None);
        };

        let mut write = removed.write;
        if cascade && !folder.session_ids.is_empty() {
            tracing::info!(
                "[Store] Closing {} sessions of folder {}",
                folder.session_ids.len(),
                folder.id
            );
            write = write.join(self.close_sessions(&folder.session_ids).write);
        }

        Committed::new(Some(folder), write)
    }

    /// Files a session into `folder_id`, or unfiles it with `None`.
    ///
    /// A missing target folder leaves the old membership in place.
    pub fn move_session(&mut self, session_id: &str, folder_id: Option<&str>) -> Committed<bool> {
        match folder_id {
            Some(folder_id) => self.add_session_to_folder(session_id, folder_id),
            None => self.remove_session_from_folder(session_id),
        }
    }

    // Internals

    fn persist_sessions(&self) -> PendingWrite {
        self.session_writes.enqueue(self.sessions.snapshot())
    }

    fn persist_folders(&self) -> PendingWrite {
        self.folder_writes.enqueue(self.folders.folders().to_vec())
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn notify_current_if_moved(&self, before: Option<String>) {
        let after = self.current_id();
        if before.as_deref() != after {
            self.notify(StoreEvent::CurrentChanged(after.map(str::to_string)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use recipe_core::session::HttpMethod;
    use recipe_core::RecipeError;
    use std::sync::Mutex;
    use tokio::sync::broadcast::error::TryRecvError;

    #[derive(Default)]
    struct MockSessionRepository {
        initial: Option<SessionSnapshot>,
        saved: Mutex<Vec<SessionSnapshot>>,
        fail: bool,
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn load(&self) -> Result<Option<SessionSnapshot>> {
            Ok(self.initial.clone())
        }

        async fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
            if self.fail {
                return Err(RecipeError::io("read-only file system"));
            }
            self.saved.lock().unwrap().push(snapshot.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockFolderRepository {
        saved: Mutex<Vec<Vec<Folder>>>,
    }

    #[async_trait]
    impl FolderRepository for MockFolderRepository {
        async fn load(&self) -> Result<Option<Vec<Folder>>> {
            Ok(None)
        }

        async fn save(&self, folders: &[Folder]) -> Result<()> {
            self.saved.lock().unwrap().push(folders.to_vec());
            Ok(())
        }
    }

    struct Fixture {
        store: PlaygroundStore,
        sessions: Arc<MockSessionRepository>,
        folders: Arc<MockFolderRepository>,
    }

    async fn fixture_with(sessions: MockSessionRepository) -> Fixture {
        let sessions = Arc::new(sessions);
        let folders = Arc::new(MockFolderRepository::default());
        let store = PlaygroundStore::load(sessions.clone(), folders.clone())
            .await
            .unwrap();
        Fixture {
            store,
            sessions,
            folders,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with(MockSessionRepository::default()).await
    }

    fn recipe() -> Recipe {
        Recipe {
            id: "gh-search-repos".to_string(),
            title: "Search repositories".to_string(),
            project: "GitHub".to_string(),
            method: HttpMethod::Get,
            auth: None,
            summary: None,
            docs_url: None,
        }
    }

    fn drain(rx: &mut broadcast::Receiver<StoreEvent>) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return events,
                Err(TryRecvError::Lagged(_)) => continue,
            }
        }
    }

    #[tokio::test]
    async fn test_create_persists_snapshot() {
        let mut f = fixture().await;
        let session = f
            .store
            .create_session(Some(PartialSession::named("List users")))
            .persisted()
            .await
            .unwrap();

        let saved = f.sessions.saved.lock().unwrap();
        let last = saved.last().unwrap();
        assert_eq!(last.sessions, vec![session]);
        assert!(last.current_session_id.is_none());
    }

    #[tokio::test]
    async fn test_close_scenario_emits_current_changes() {
        let mut f = fixture().await;
        let a = f.store.create_session(Some(PartialSession::named("A"))).into_value();
        let b = f.store.create_session(Some(PartialSession::named("B"))).into_value();
        let c = f.store.create_session(Some(PartialSession::named("C"))).into_value();
        let _ = f.store.set_current(Some(b.id.clone()));

        let mut rx = f.store.subscribe();
        let next = f.store.close_session(&b.id).into_value().unwrap();
        assert_eq!(next.id, c.id);
        assert_eq!(
            drain(&mut rx),
            vec![
                StoreEvent::SessionsChanged,
                StoreEvent::CurrentChanged(Some(c.id.clone()))
            ]
        );

        assert_eq!(f.store.close_session(&c.id).into_value().unwrap().id, a.id);
        assert!(f.store.close_session(&a.id).into_value().is_none());
        assert!(f.store.current_session().is_none());

        f.store.flush().await.unwrap();
        let saved = f.sessions.saved.lock().unwrap();
        let last = saved.last().unwrap();
        assert!(last.sessions.is_empty());
        assert!(last.current_session_id.is_none());
    }

    #[tokio::test]
    async fn test_noop_mutations_write_nothing() {
        let mut f = fixture().await;
        let mut rx = f.store.subscribe();

        let closed = f.store.close_session("missing");
        assert!(closed.value.is_none());
        assert!(closed.write.is_empty());
        assert!(f.store.update_name("missing", "x").write.is_empty());
        assert!(f.store.rename_folder("missing", "x").write.is_empty());
        assert!(f.store.add_session_to_folder("s", "missing").write.is_empty());

        assert!(drain(&mut rx).is_empty());
        assert!(f.sessions.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_is_never_filed() {
        let mut f = fixture().await;
        let folder = f.store.add_folder("F").into_value();
        let mut rx = f.store.subscribe();

        let filed = f.store.add_session_to_folder("ghost-session", &folder.id);
        assert!(!filed.value);
        assert!(filed.write.is_empty());
        let moved = f.store.move_session("ghost-session", Some(&folder.id));
        assert!(!moved.value);
        assert!(moved.write.is_empty());

        assert!(f.store.folders().get(&folder.id).unwrap().session_ids.is_empty());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_state() {
        let mut f = fixture_with(MockSessionRepository {
            fail: true,
            ..MockSessionRepository::default()
        })
        .await;

        let committed = f.store.create_session(Some(PartialSession::named("A")));
        let id = committed.value.id.clone();
        let err = committed.write.persisted().await.unwrap_err();

        assert!(err.is_io());
        assert!(f.store.sessions().contains(&id));
        assert!(f.store.flush().await.is_err());
    }

    #[tokio::test]
    async fn test_load_restores_snapshot() {
        let session = Session {
            id: "s-1".to_string(),
            name: "Saved".to_string(),
            recipe_id: "r-1".to_string(),
            method: HttpMethod::Post,
            editor: EditorState::default(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let f = fixture_with(MockSessionRepository {
            initial: Some(SessionSnapshot {
                sessions: vec![session.clone()],
                current_session_id: Some("s-1".to_string()),
            }),
            ..MockSessionRepository::default()
        })
        .await;

        assert_eq!(f.store.current_session(), Some(&session));
        assert_eq!(f.store.sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_simple_and_linked() {
        let mut f = fixture().await;
        let source = f
            .store
            .create_session(Some(
                PartialSession::named("Charge")
                    .with_method(HttpMethod::Post)
                    .with_recipe_id("stripe-charge"),
            ))
            .into_value();

        let simple = f
            .store
            .duplicate_session(&source.id, None, DuplicateMode::Simple)
            .into_value()
            .unwrap();
        assert_eq!(simple.name, "Charge copy");
        assert_eq!(simple.method, HttpMethod::Post);
        assert_ne!(simple.id, source.id);
        assert_ne!(simple.recipe_id, source.recipe_id);
        assert_eq!(f.store.current_id(), Some(simple.id.as_str()));

        let linked = f
            .store
            .duplicate_session(&source.id, Some("Charge (EU)".to_string()), DuplicateMode::Linked)
            .into_value()
            .unwrap();
        assert_eq!(linked.name, "Charge (EU)");
        assert_eq!(linked.recipe_id, "stripe-charge");

        assert!(f
            .store
            .duplicate_session("missing", None, DuplicateMode::Simple)
            .into_value()
            .is_none());
        assert_eq!(f.store.sessions().len(), 3);
    }

    #[tokio::test]
    async fn test_open_recipe_is_transient() {
        let mut f = fixture().await;
        let session = f.store.open_recipe(&recipe()).persisted().await.unwrap();

        assert_eq!(session.id, PLAYGROUND_SESSION_ID);
        assert_eq!(session.recipe_id, "gh-search-repos");
        assert_eq!(f.store.current_session().unwrap().name, "Search repositories");
        assert!(f.store.sessions().is_empty());

        // Keeping it means duplicating it into the registry
        let kept = f
            .store
            .duplicate_session(PLAYGROUND_SESSION_ID, Some("Search".into()), DuplicateMode::Linked)
            .into_value()
            .unwrap();
        assert_eq!(kept.recipe_id, "gh-search-repos");
        assert!(f.store.session(PLAYGROUND_SESSION_ID).is_none());
        assert_eq!(f.store.current_session(), Some(&kept));
    }

    #[tokio::test]
    async fn test_fork_recipe_becomes_current() {
        let mut f = fixture().await;
        let session = f.store.fork_recipe(&recipe()).persisted().await.unwrap();

        assert_ne!(session.id, PLAYGROUND_SESSION_ID);
        assert_eq!(session.name, "Search repositories");
        assert_eq!(session.recipe_id, "gh-search-repos");
        assert_eq!(f.store.current_id(), Some(session.id.as_str()));
    }

    #[tokio::test]
    async fn test_new_request_into_folder() {
        let mut f = fixture().await;
        let folder = f.store.add_folder("Scratch").into_value();

        let session = f
            .store
            .new_request(Some(&folder.id))
            .persisted()
            .await
            .unwrap();
        assert_eq!(f.store.current_id(), Some(session.id.as_str()));
        assert_eq!(f.store.folders().folder_of(&session.id).unwrap().id, folder.id);

        let saved = f.folders.saved.lock().unwrap();
        assert_eq!(saved.last().unwrap()[0].session_ids, vec![session.id.clone()]);
    }

    #[tokio::test]
    async fn test_new_request_from_template() {
        let mut f = fixture().await;
        let template = PartialSession::named("Create issue").with_method(HttpMethod::Post);

        let session = f
            .store
            .new_request_from(Some(template), Some("missing-folder"))
            .persisted()
            .await
            .unwrap();
        assert_eq!(session.name, "Create issue");
        assert_eq!(session.method, HttpMethod::Post);
        assert_eq!(f.store.current_session(), Some(&session));
        assert!(f.store.folders().folder_of(&session.id).is_none());
    }

    #[tokio::test]
    async fn test_delete_session_unfiles_it() {
        let mut f = fixture().await;
        let folder = f.store.add_folder("Auth APIs").into_value();
        let session = f.store.new_request(Some(&folder.id)).into_value();

        f.store.delete_session(&session.id).persisted().await.unwrap();
        assert!(!f.store.sessions().contains(&session.id));
        assert!(f.store.folders().get(&folder.id).unwrap().session_ids.is_empty());
        assert!(f.store.current_id().is_none());
    }

    #[tokio::test]
    async fn test_delete_folder_with_and_without_cascade() {
        let mut f = fixture().await;
        let keep = f.store.add_folder("Keep").into_value();
        let doomed = f.store.add_folder("Drop").into_value();
        let a = f.store.new_request(Some(&keep.id)).into_value();
        let b = f.store.new_request(Some(&doomed.id)).into_value();

        let removed = f.store.delete_folder(&keep.id, false).into_value().unwrap();
        assert_eq!(removed.session_ids, vec![a.id.clone()]);
        assert!(f.store.sessions().contains(&a.id));
        assert!(f.store.sidebar().unfiled.iter().any(|s| s.id == a.id));

        let _ = f.store.set_current(Some(b.id.clone()));
        let removed = f.store.delete_folder(&doomed.id, true);
        removed.write.persisted().await.unwrap();
        assert!(!f.store.sessions().contains(&b.id));
        assert_eq!(f.store.current_id(), Some(a.id.as_str()));
        assert!(f.store.folders().folders().is_empty());
    }

    #[tokio::test]
    async fn test_move_session_between_folders() {
        let mut f = fixture().await;
        let auth = f.store.add_folder("Auth APIs").into_value();
        let scratch = f.store.add_folder("Scratch").into_value();
        let a = f.store.new_request(Some(&auth.id)).into_value();

        assert!(f.store.move_session(&a.id, Some(&scratch.id)).value);
        assert_eq!(f.store.folders().folder_of(&a.id).unwrap().name, "Scratch");

        assert!(!f.store.move_session(&a.id, Some("missing")).value);
        assert_eq!(f.store.folders().folder_of(&a.id).unwrap().name, "Scratch");

        assert!(f.store.move_session(&a.id, None).value);
        assert!(f.store.folders().folder_of(&a.id).is_none());
    }

    #[tokio::test]
    async fn test_editing_playground_stays_in_memory() {
        let mut f = fixture().await;
        let _ = f.store.open_recipe(&recipe());

        let editor = EditorState {
            url: serde_json::json!("https://api.github.com/search/repositories"),
            ..EditorState::default()
        };
        let committed = f.store.update_editor(PLAYGROUND_SESSION_ID, editor.clone());
        assert!(committed.value);
        assert!(committed.write.is_empty());
        assert_eq!(f.store.current_session().unwrap().editor, editor);

        let _ = f.store.set_current(None);
        assert!(f.store.session(PLAYGROUND_SESSION_ID).is_none());
    }
}
