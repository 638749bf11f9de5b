use super::context::AppContext;
use anyhow::{bail, Result};
use clap::Subcommand;
use recipe_application::{DuplicateMode, PlaygroundStore};
use recipe_core::session::{HttpMethod, PartialSession, Session};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Show sessions grouped by folder
    List,
    /// Create a new request and make it current
    New {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = HttpMethod::Get)]
        method: HttpMethod,
        /// Folder to file the request into
        #[arg(long)]
        folder: Option<String>,
    },
    /// Make a session current
    Use { id: String },
    /// Rename a session
    Rename { id: String, name: String },
    /// Copy a session; the copy becomes current
    Duplicate {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Share the source's recipe id, auth settings and secret
        #[arg(long)]
        linked: bool,
    },
    /// Close sessions without touching folders
    Close {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Close a session and remove it from its folder
    Delete { id: String },
}

pub async fn run(context: &AppContext, action: SessionAction) -> Result<()> {
    let mut store = context.store().await?;

    match action {
        SessionAction::List => print_sidebar(&store),
        SessionAction::New {
            name,
            method,
            folder,
        } => {
            if let Some(folder_id) = folder.as_deref() {
                if store.folders().get(folder_id).is_none() {
                    bail!("No folder with id {}", folder_id);
                }
            }
            let mut template = PartialSession::default().with_method(method);
            template.name = name;
            let session = store
                .new_request_from(Some(template), folder.as_deref())
                .persisted()
                .await?;
            println!("Created session {}", session.id);
        }
        SessionAction::Use { id } => {
            if store.session(&id).is_none() {
                bail!("No session with id {}", id);
            }
            store.set_current(Some(id.clone())).persisted().await?;
            println!("Current session: {}", id);
        }
        SessionAction::Rename { id, name } => {
            if !store.update_name(&id, name).persisted().await? {
                bail!("No session with id {}", id);
            }
        }
        SessionAction::Duplicate { id, name, linked } => {
            let mode = if linked {
                DuplicateMode::Linked
            } else {
                DuplicateMode::Simple
            };
            match store.duplicate_session(&id, name, mode).persisted().await? {
                Some(copy) => println!("Created {} ({})", copy.display_name(), copy.id),
                None => bail!("No session with id {}", id),
            }
        }
        SessionAction::Close { ids } => {
            let next = store.close_sessions(&ids).persisted().await?;
            report_current(&store, next);
        }
        SessionAction::Delete { id } => {
            let next = store.delete_session(&id).persisted().await?;
            report_current(&store, next);
        }
    }

    Ok(())
}

fn report_current(store: &PlaygroundStore, next: Option<Session>) {
    match (next, store.current_session()) {
        (Some(next), _) => println!("Current session: {} ({})", next.display_name(), next.id),
        (None, None) => println!("No session is current"),
        (None, Some(_)) => {}
    }
}

fn print_sidebar(store: &PlaygroundStore) {
    let tree = store.sidebar();
    let current = store.current_id();
    let line = |session: &Session| {
        let marker = if Some(session.id.as_str()) == current { "*" } else { " " };
        format!(
            "{} {:<7} {}  ({})",
            marker,
            session.method,
            session.display_name(),
            session.id
        )
    };

    for group in &tree.folders {
        println!("📁 {} ({})", group.folder.name, group.folder.id);
        for session in &group.sessions {
            println!("  {}", line(session));
        }
    }
    for session in &tree.unfiled {
        println!("{}", line(session));
    }

    if let Some(session) = store.current_session() {
        if session.id == recipe_core::session::PLAYGROUND_SESSION_ID {
            println!("* playground: {}", session.display_name());
        }
    }
}
