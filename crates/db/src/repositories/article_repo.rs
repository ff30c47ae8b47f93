//! Repository for the `articles` table and its view counters.

use newsdesk_core::article::ArticleFields;
use newsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::article::{Article, ArticleWithMeta};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, title, excerpt, content, image_url, category, \
                       author_id, author_name, read_time, video_url";

/// Provides CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article, returning the created row.
    pub async fn create(
        pool: &PgPool,
        fields: &ArticleFields,
        author_id: Option<DbId>,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles \
                (title, excerpt, content, image_url, category, author_id, author_name, \
                 read_time, video_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&fields.title)
            .bind(&fields.excerpt)
            .bind(&fields.content)
            .bind(&fields.image_url)
            .bind(&fields.category)
            .bind(author_id)
            .bind(&fields.author_name)
            .bind(&fields.read_time)
            .bind(&fields.video_url)
            .fetch_one(pool)
            .await
    }

    /// Find an article by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return which of `ids` belong to existing articles.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM articles WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// List all articles, newest first, with view counts and author email.
    pub async fn list_with_meta(pool: &PgPool) -> Result<Vec<ArticleWithMeta>, sqlx::Error> {
        sqlx::query_as::<_, ArticleWithMeta>(
            "SELECT a.id, a.created_at, a.title, a.excerpt, a.content, a.image_url, \
                    a.category, a.author_id, a.author_name, a.read_time, a.video_url, \
                    COALESCE(m.views, 0) AS views, \
                    u.email AS author_email \
             FROM articles a \
             LEFT JOIN article_metrics m ON m.article_id = a.id \
             LEFT JOIN users u ON u.id = a.author_id \
             ORDER BY a.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Overwrite the editable columns of an article.
    ///
    /// `created_at` and `author_id` are never touched. Returns `None` if no
    /// row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &ArticleFields,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET \
                title = $2, excerpt = $3, content = $4, image_url = $5, category = $6, \
                author_name = $7, read_time = $8, video_url = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&fields.title)
            .bind(&fields.excerpt)
            .bind(&fields.content)
            .bind(&fields.image_url)
            .bind(&fields.category)
            .bind(&fields.author_name)
            .bind(&fields.read_time)
            .bind(&fields.video_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article. Returns `true` if a row was removed.
    ///
    /// Metrics and carousel entries referencing it are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count one view through the `increment_article_views` procedure.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT increment_article_views($1)")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Current view count of an article. Zero when it was never viewed.
    pub async fn views(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE((SELECT views FROM article_metrics WHERE article_id = $1), 0)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
