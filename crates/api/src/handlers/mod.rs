//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the repositories in `newsdesk_db`, keep the query
//! cache consistent after writes, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod admin;
pub mod ads;
pub mod articles;
pub mod auth;
pub mod carousel;
pub mod dashboard;
pub mod editor;
pub mod ordering;
pub mod ticker;
