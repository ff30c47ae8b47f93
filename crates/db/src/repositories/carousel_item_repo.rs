//! Repository for the `carousel_items` table.

use newsdesk_core::content::{ListKind, NewCarouselItem};
use newsdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::carousel_item::{CarouselItem, CarouselItemWithArticle};
use crate::repositories::ordered_list::{self, ReplaceMode};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, article_id, active, \"order\", created_at";

/// Reads and replace-all saves for the featured-article carousel.
pub struct CarouselItemRepo;

impl CarouselItemRepo {
    /// List the active carousel items in display order, with article titles.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<CarouselItemWithArticle>, sqlx::Error> {
        sqlx::query_as::<_, CarouselItemWithArticle>(
            "SELECT c.id, c.article_id, c.active, c.\"order\", c.created_at, \
                    a.title AS article_title \
             FROM carousel_items c \
             JOIN articles a ON a.id = c.article_id \
             WHERE c.active = true \
             ORDER BY c.\"order\" ASC, c.created_at ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Insert every item in one statement. An empty slice inserts nothing.
    ///
    /// Rows come back sorted by `order`.
    pub async fn insert_batch(
        conn: &mut PgConnection,
        items: &[NewCarouselItem],
    ) -> Result<Vec<CarouselItem>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let article_ids: Vec<DbId> = items.iter().map(|i| i.article_id).collect();
        let actives: Vec<bool> = items.iter().map(|i| i.active).collect();
        let orders: Vec<i32> = items.iter().map(|i| i.order).collect();

        let query = format!(
            "INSERT INTO carousel_items (article_id, active, \"order\") \
             SELECT * FROM UNNEST($1::uuid[], $2::boolean[], $3::integer[]) \
             RETURNING {COLUMNS}"
        );
        let mut rows = sqlx::query_as::<_, CarouselItem>(&query)
            .bind(&article_ids)
            .bind(&actives)
            .bind(&orders)
            .fetch_all(conn)
            .await?;
        rows.sort_by_key(|row| row.order);
        Ok(rows)
    }

    /// Replace the active carousel with `items`.
    ///
    /// See [`ordered_list`] for the semantics of each [`ReplaceMode`].
    pub async fn replace_all(
        pool: &PgPool,
        items: &[NewCarouselItem],
        mode: ReplaceMode,
    ) -> Result<Vec<CarouselItem>, sqlx::Error> {
        match mode {
            ReplaceMode::TwoPhase => {
                let mut conn = pool.acquire().await?;
                let deactivated =
                    ordered_list::deactivate_active(&mut *conn, ListKind::Carousel).await?;
                tracing::debug!(deactivated, "Carousel items deactivated");
                Self::insert_batch(&mut *conn, items).await
            }
            ReplaceMode::Atomic => {
                let mut tx = pool.begin().await?;
                let deactivated =
                    ordered_list::deactivate_active(&mut *tx, ListKind::Carousel).await?;
                tracing::debug!(deactivated, "Carousel items deactivated");
                let rows = Self::insert_batch(&mut *tx, items).await?;
                tx.commit().await?;
                Ok(rows)
            }
        }
    }
}
