//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`bootstrap`] -- First-run admin account.

pub mod bootstrap;
pub mod jwt;
pub mod password;
