//! Repository for the `users` table.

use newsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, is_admin, created_at";

/// Provides lookups, search and the admin-flag toggle for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, is_admin)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive email search. `pattern` is a ready-made `ILIKE`
    /// pattern (see `newsdesk_core::users::email_search_pattern`).
    pub async fn search_by_email(
        pool: &PgPool,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, email, is_admin FROM users
             WHERE email ILIKE $1
             ORDER BY email ASC
             LIMIT $2",
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Set the admin flag through the `toggle_admin_status` procedure.
    pub async fn set_admin_status(
        pool: &PgPool,
        id: DbId,
        new_status: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT toggle_admin_status($1, $2)")
            .bind(id)
            .bind(new_status)
            .execute(pool)
            .await?;
        Ok(())
    }
}
