//! Application layer for the recipe playground.
//!
//! `PlaygroundStore` is the state container the UI talks to; it coordinates
//! the domain registries with the persistence repositories.

pub mod auth_service;
mod persistence;
pub mod store;

pub use auth_service::{AuthService, RecipeCredentials};
pub use persistence::{Committed, PendingWrite};
pub use store::{DuplicateMode, PlaygroundStore, StoreEvent, DEFAULT_EVENT_CAPACITY};
