use super::context::AppContext;
use anyhow::{bail, Result};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum FolderAction {
    /// Create an empty folder
    Add { name: String },
    /// Rename a folder
    Rename { id: String, name: String },
    /// Delete a folder
    Remove {
        id: String,
        /// Also close every session in the folder
        #[arg(long)]
        cascade: bool,
    },
    /// File a session into a folder, or unfile it when no folder is given
    Move {
        session_id: String,
        #[arg(long)]
        to: Option<String>,
    },
}

pub async fn run(context: &AppContext, action: FolderAction) -> Result<()> {
    let mut store = context.store().await?;

    match action {
        FolderAction::Add { name } => {
            let folder = store.add_folder(name).persisted().await?;
            println!("Created folder {} ({})", folder.name, folder.id);
        }
        FolderAction::Rename { id, name } => {
            if !store.rename_folder(&id, name).persisted().await? {
                bail!("No folder with id {}", id);
            }
        }
        FolderAction::Remove { id, cascade } => {
            let Some(folder) = store.delete_folder(&id, cascade).persisted().await? else {
                bail!("No folder with id {}", id);
            };
            if cascade {
                println!(
                    "Deleted folder {} and closed {} sessions",
                    folder.name,
                    folder.session_ids.len()
                );
            } else {
                println!("Deleted folder {}", folder.name);
            }
        }
        FolderAction::Move { session_id, to } => {
            if !store.sessions().contains(&session_id) {
                bail!("No session with id {}", session_id);
            }
            if let Some(folder_id) = to.as_deref() {
                if store.folders().get(folder_id).is_none() {
                    bail!("No folder with id {}", folder_id);
                }
            }
            store.move_session(&session_id, to.as_deref()).persisted().await?;
        }
    }

    Ok(())
}
