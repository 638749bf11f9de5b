pub mod auth;
pub mod context;
pub mod folders;
pub mod logging;
pub mod recipes;
pub mod sessions;
