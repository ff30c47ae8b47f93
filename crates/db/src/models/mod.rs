//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row, plus create/update DTOs where the table is written to directly.

pub mod ad;
pub mod article;
pub mod carousel_item;
pub mod dashboard;
pub mod session;
pub mod ticker_item;
pub mod user;
