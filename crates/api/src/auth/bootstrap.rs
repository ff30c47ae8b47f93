//! First-run admin account.
//!
//! Accounts are never self-registered. When `BOOTSTRAP_ADMIN_EMAIL` and
//! `BOOTSTRAP_ADMIN_PASSWORD` are set and no user with that email exists,
//! one admin is created at startup so the panel can be reached at all.

use newsdesk_db::models::user::{CreateUser, User};
use newsdesk_db::repositories::UserRepo;
use sqlx::PgPool;

use super::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};

/// Credentials for the first admin account.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl BootstrapAdmin {
    /// Read both variables. `None` unless both are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("BOOTSTRAP_ADMIN_EMAIL").ok()?;
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;
        if email.trim().is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            email: email.trim().to_string(),
            password,
        })
    }
}

/// Errors raised while creating the bootstrap admin.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("weak bootstrap password: {0}")]
    WeakPassword(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Create the admin if no user has its email yet.
///
/// Returns the created user, or `None` when the email is already taken (the
/// existing account is left untouched, including its admin flag).
pub async fn ensure_admin(
    pool: &PgPool,
    admin: &BootstrapAdmin,
) -> Result<Option<User>, BootstrapError> {
    if UserRepo::find_by_email(pool, &admin.email).await?.is_some() {
        return Ok(None);
    }
    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(BootstrapError::WeakPassword)?;
    let password_hash =
        hash_password(&admin.password).map_err(|e| BootstrapError::Hash(e.to_string()))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: admin.email.clone(),
            password_hash,
            is_admin: true,
        },
    )
    .await?;
    Ok(Some(user))
}
