//! Session domain module.
//!
//! - `model`: `Session`, its editor state and creation template
//! - `registry`: the in-memory ordered session set and current pointer
//! - `repository`: persistence trait and snapshot type

mod model;
mod registry;
mod repository;

pub use model::{EditorState, HttpMethod, PartialSession, Session, PLAYGROUND_SESSION_ID};
pub use registry::SessionRegistry;
pub use repository::{SessionRepository, SessionSnapshot};
