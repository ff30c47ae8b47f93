//! Aggregate queries behind the dashboard summary.
//!
//! Each query is independent so the caller can run them concurrently.

use newsdesk_core::content::ListKind;
use sqlx::PgPool;

use crate::models::dashboard::TopViewedRow;
use crate::repositories::ordered_list;

/// Read-only counters for the dashboard.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Total number of articles.
    pub async fn count_articles(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Number of articles that have an author reference.
    pub async fn count_articles_with_author(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM articles WHERE author_id IS NOT NULL")
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Number of active rows in the ticker or the carousel.
    pub async fn count_active(pool: &PgPool, kind: ListKind) -> Result<i64, sqlx::Error> {
        ordered_list::count_active(pool, kind).await
    }

    /// Sum of views across every article.
    pub async fn total_views(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(views), 0)::BIGINT FROM article_metrics")
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// The `limit` most viewed articles, most viewed first.
    pub async fn top_viewed(pool: &PgPool, limit: i64) -> Result<Vec<TopViewedRow>, sqlx::Error> {
        sqlx::query_as::<_, TopViewedRow>(
            "SELECT a.title, m.views \
             FROM article_metrics m \
             JOIN articles a ON a.id = m.article_id \
             ORDER BY m.views DESC, a.title ASC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
