//! Domain layer of the recipe playground.
//!
//! Pure state and interfaces: session and folder registries, the secret
//! vault and repository traits, catalog records, and the shared error type.
//! Nothing in this crate touches the file system or the network.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod folder;
pub mod secret;
pub mod session;

// Re-export common error type
pub use error::{RecipeError, Result};
