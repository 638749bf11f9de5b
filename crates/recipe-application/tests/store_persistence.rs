//! End-to-end tests of the store over the file-backed repositories.

use recipe_application::{DuplicateMode, PlaygroundStore, StoreEvent};
use recipe_core::folder::FolderRepository;
use recipe_core::secret::SecretVault;
use recipe_core::session::{EditorState, HttpMethod, PartialSession, SessionRepository};
use recipe_infrastructure::{FileFolderRepository, FileSecretVault, FileSessionRepository, RecipePaths};
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

async fn open(paths: &RecipePaths) -> PlaygroundStore {
    let sessions: Arc<dyn SessionRepository> =
        Arc::new(FileSessionRepository::new(paths.sessions_file()));
    let folders: Arc<dyn FolderRepository> =
        Arc::new(FileFolderRepository::new(paths.folders_file()));
    PlaygroundStore::load(sessions, folders).await.unwrap()
}

#[tokio::test]
async fn test_first_start_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = open(&RecipePaths::new(dir.path())).await;

    assert!(store.sessions().is_empty());
    assert!(store.folders().folders().is_empty());
    assert!(store.current_session().is_none());
}

#[tokio::test]
async fn test_restart_round_trip() {
    let dir = TempDir::new().unwrap();
    let paths = RecipePaths::new(dir.path());

    let (sessions_before, folders_before) = {
        let mut store = open(&paths).await;
        let folder = store.add_folder("Auth APIs").into_value();
        let a = store
            .create_session(Some(
                PartialSession::named("Create charge").with_method(HttpMethod::Post),
            ))
            .into_value();
        let _ = store.create_session(Some(PartialSession::named("Unfiled")));
        let _ = store.add_session_to_folder(&a.id, &folder.id);
        let _ = store.update_editor(
            &a.id,
            EditorState {
                url: serde_json::json!("https://api.stripe.com/v1/charges"),
                body: serde_json::json!({ "amount": 2000, "currency": null }),
                ..EditorState::default()
            },
        );
        let _ = store.set_current(Some(a.id.clone()));
        store.flush().await.unwrap();

        (store.sessions().clone(), store.folders().clone())
    };

    let store = open(&paths).await;
    assert_eq!(store.sessions(), &sessions_before);
    assert_eq!(store.folders(), &folders_before);
    assert_eq!(store.current_session().unwrap().name, "Create charge");
    assert_eq!(store.sidebar().folders[0].sessions.len(), 1);
    assert_eq!(store.sidebar().unfiled.len(), 1);
}

#[tokio::test]
async fn test_awaited_writes_are_durable_without_flush() {
    let dir = TempDir::new().unwrap();
    let paths = RecipePaths::new(dir.path());

    let id = {
        let mut store = open(&paths).await;
        let session = store.new_request(None).persisted().await.unwrap();
        store.update_name(&session.id, "Renamed").persisted().await.unwrap();
        session.id
    };

    let store = open(&paths).await;
    assert_eq!(store.sessions().get(&id).unwrap().name, "Renamed");
    assert_eq!(store.current_id(), Some(id.as_str()));
}

#[tokio::test]
async fn test_created_ids_are_distinct() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&RecipePaths::new(dir.path())).await;

    let ids: HashSet<String> = (0..100)
        .map(|_| store.create_session(None).into_value().id)
        .collect();
    assert_eq!(ids.len(), 100);
}

#[tokio::test]
async fn test_close_sequence_scenario() {
    let dir = TempDir::new().unwrap();
    let paths = RecipePaths::new(dir.path());
    let mut store = open(&paths).await;
    let mut events = store.subscribe();

    let a = store.create_session(Some(PartialSession::named("A"))).into_value();
    let b = store.create_session(Some(PartialSession::named("B"))).into_value();
    let c = store.create_session(Some(PartialSession::named("C"))).into_value();
    let _ = store.set_current(Some(b.id.clone()));

    let _ = store.close_session(&b.id);
    assert_eq!(store.current_id(), Some(c.id.as_str()));
    let _ = store.close_session(&c.id);
    assert_eq!(store.current_id(), Some(a.id.as_str()));
    store.close_session(&a.id).persisted().await.unwrap();
    assert!(store.current_id().is_none());

    let mut current_changes = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let StoreEvent::CurrentChanged(id) = event {
            current_changes.push(id);
        }
    }
    assert_eq!(
        current_changes,
        vec![Some(b.id.clone()), Some(c.id.clone()), Some(a.id.clone()), None]
    );

    let reopened = open(&paths).await;
    assert!(reopened.sessions().is_empty());
    assert!(reopened.current_id().is_none());
}

#[tokio::test]
async fn test_folder_move_scenario() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&RecipePaths::new(dir.path())).await;

    let auth = store.add_folder("Auth APIs").into_value();
    let scratch = store.add_folder("Scratch").into_value();
    let a = store.create_session(Some(PartialSession::named("A"))).into_value();

    let _ = store.add_session_to_folder(&a.id, &auth.id);
    let _ = store.add_session_to_folder(&a.id, &scratch.id);

    assert_eq!(store.folders().folder_of(&a.id).unwrap().name, "Scratch");
    assert!(!store.folders().get(&auth.id).unwrap().contains(&a.id));
}

#[tokio::test]
async fn test_remove_folder_leaves_sessions() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&RecipePaths::new(dir.path())).await;

    let folder = store.add_folder("Auth APIs").into_value();
    let a = store.new_request(Some(&folder.id)).into_value();
    let b = store.new_request(Some(&folder.id)).into_value();

    let _ = store.remove_folder(&folder.id);
    for id in [&a.id, &b.id] {
        assert!(store.folders().folder_of(id).is_none());
        assert!(store.sessions().contains(id));
    }
}

#[tokio::test]
async fn test_linked_copy_shares_secret() {
    let dir = TempDir::new().unwrap();
    let paths = RecipePaths::new(dir.path());
    let mut store = open(&paths).await;
    let vault = FileSecretVault::new(paths.secrets_dir());

    let source = store
        .create_session(Some(PartialSession::named("Charge").with_recipe_id("stripe-charge")))
        .into_value();
    vault.set(&source.recipe_id, "sk_test_123").await.unwrap();

    let linked = store
        .duplicate_session(&source.id, None, DuplicateMode::Linked)
        .into_value()
        .unwrap();
    let simple = store
        .duplicate_session(&source.id, None, DuplicateMode::Simple)
        .into_value()
        .unwrap();

    assert_eq!(vault.get(&linked.recipe_id).await.unwrap().as_deref(), Some("sk_test_123"));
    assert!(vault.get(&simple.recipe_id).await.unwrap().is_none());
}
