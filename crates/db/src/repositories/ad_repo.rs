//! Repository for the `ads` table.

use newsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::ad::{Ad, CreateAd, UpdateAd};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, image_url, link_url, position, active, start_date, end_date, \
                       created_at, updated_at";

/// Provides CRUD operations for ads.
pub struct AdRepo;

impl AdRepo {
    /// Insert a new ad, returning the created row.
    ///
    /// Missing fields default to active, starting today and ending 30 days
    /// later.
    pub async fn create(pool: &PgPool, input: &CreateAd) -> Result<Ad, sqlx::Error> {
        let query = format!(
            "INSERT INTO ads (title, image_url, link_url, position, active, start_date, end_date) \
             VALUES ($1, $2, $3, $4, COALESCE($5, true), COALESCE($6, CURRENT_DATE), \
                     COALESCE($7, CURRENT_DATE + 30)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(&input.position)
            .bind(input.active)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find an ad by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ads WHERE id = $1");
        sqlx::query_as::<_, Ad>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all ads ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ads ORDER BY created_at DESC");
        sqlx::query_as::<_, Ad>(&query).fetch_all(pool).await
    }

    /// Update an ad. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAd,
    ) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!(
            "UPDATE ads SET
                title = COALESCE($2, title),
                image_url = COALESCE($3, image_url),
                link_url = COALESCE($4, link_url),
                position = COALESCE($5, position),
                active = COALESCE($6, active),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(&input.position)
            .bind(input.active)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete an ad. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
