//! Folder domain module.
//!
//! Folders group sessions for display. A session belongs to at most one
//! folder; deleting a folder never deletes its sessions by itself.

mod model;
mod registry;
mod repository;

pub use model::Folder;
pub use registry::{FolderGroup, FolderRegistry, SessionTree};
pub use repository::FolderRepository;
