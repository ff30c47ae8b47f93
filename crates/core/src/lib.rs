//! Domain logic for the newsdesk admin backend.
//!
//! Everything here is IO-free apart from the in-memory query cache, so it can
//! be shared by the repository layer, the HTTP layer, and tests.

pub mod ads;
pub mod article;
pub mod cache;
pub mod content;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod ordering;
pub mod roles;
pub mod types;
pub mod users;
