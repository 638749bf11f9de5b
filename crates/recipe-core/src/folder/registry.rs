//! In-memory folder registry.

use super::model::Folder;
use crate::session::{Session, SessionRegistry};
use std::collections::HashSet;
use uuid::Uuid;

/// Ordered set of folders and their session membership.
///
/// Membership is exclusive: adding a session to a folder first removes it
/// from whichever folder held it. Unknown folder or session ids are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderRegistry {
    folders: Vec<Folder>,
}

/// One folder with its member sessions resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderGroup {
    pub folder: Folder,
    pub sessions: Vec<Session>,
}

/// Sessions grouped the way the sidebar shows them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTree {
    /// Folders in order, each with its existing member sessions
    pub folders: Vec<FolderGroup>,
    /// Sessions in no folder, in registry order
    pub unfiled: Vec<Session>,
}

impl FolderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the registry from stored folders.
    ///
    /// Repairs the two invariants a hand-edited or partially written file
    /// could break: duplicate ids inside a folder, and a session id listed
    /// in more than one folder (the first folder keeps it).
    pub fn from_folders(folders: Vec<Folder>) -> Self {
        let mut claimed = HashSet::new();
        let folders = folders
            .into_iter()
            .map(|mut folder| {
                folder.session_ids.retain(|id| claimed.insert(id.clone()));
                folder
            })
            .collect();
        Self { folders }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn get(&self, folder_id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == folder_id)
    }

    fn get_mut(&mut self, folder_id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == folder_id)
    }

    /// Creates a folder with no members.
    pub fn add_folder(&mut self, name: impl Into<String>) -> Folder {
        let folder = Folder {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            session_ids: Vec::new(),
        };
        self.folders.push(folder.clone());
        folder
    }

    pub fn rename_folder(&mut self, folder_id: &str, new_name: impl Into<String>) -> bool {
        match self.get_mut(folder_id) {
            Some(folder) => {
                folder.name = new_name.into();
                true
            }
            None => false,
        }
    }

    /// Deletes the folder record and returns it.
    ///
    /// Member sessions are untouched; the returned folder carries their ids
    /// for callers that also want to close them.
    pub fn remove_folder(&mut self, folder_id: &str) -> Option<Folder> {
        let index = self.folders.iter().position(|f| f.id == folder_id)?;
        Some(self.folders.remove(index))
    }

    /// Appends a session to a folder, moving it out of any other folder.
    ///
    /// Does nothing if the target folder does not exist, so a session is
    /// never dropped from its old folder by a failed move.
    pub fn add_session_to_folder(&mut self, session_id: &str, folder_id: &str) -> bool {
        if self.get(folder_id).is_none() {
            return false;
        }

        self.remove_session_from_folder(session_id);

        match self.get_mut(folder_id) {
            Some(folder) => {
                folder.session_ids.push(session_id.to_string());
                true
            }
            None => false,
        }
    }

    /// Removes a session from whichever folder contains it.
    pub fn remove_session_from_folder(&mut self, session_id: &str) -> bool {
        let mut removed = false;
        for folder in &mut self.folders {
            let before = folder.session_ids.len();
            folder.session_ids.retain(|id| id != session_id);
            removed |= folder.session_ids.len() != before;
        }
        removed
    }

    /// Returns the folder that contains `session_id`, if any.
    pub fn folder_of(&self, session_id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.contains(session_id))
    }

    /// Groups the registry's sessions by folder.
    ///
    /// Folder members that no longer exist in `sessions` are skipped.
    pub fn group_sessions(&self, sessions: &SessionRegistry) -> SessionTree {
        let mut filed = HashSet::new();

        let folders = self
            .folders
            .iter()
            .map(|folder| {
                let members = folder
                    .session_ids
                    .iter()
                    .filter_map(|id| sessions.get(id))
                    .inspect(|s| {
                        filed.insert(s.id.clone());
                    })
                    .cloned()
                    .collect();
                FolderGroup {
                    folder: folder.clone(),
                    sessions: members,
                }
            })
            .collect();

        let unfiled = sessions
            .sessions()
            .iter()
            .filter(|s| !filed.contains(&s.id))
            .cloned()
            .collect();

        SessionTree { folders, unfiled }
    }
}
