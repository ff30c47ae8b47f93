//! Repository for the `ticker_items` table.

use newsdesk_core::content::{ListKind, NewTickerItem};
use sqlx::{PgConnection, PgPool};

use crate::models::ticker_item::TickerItem;
use crate::repositories::ordered_list::{self, ReplaceMode};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, text, link, active, \"order\", created_at";

/// Reads and replace-all saves for the news ticker.
pub struct TickerItemRepo;

impl TickerItemRepo {
    /// List the active ticker items in display order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<TickerItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ticker_items \
             WHERE active = true \
             ORDER BY \"order\" ASC, created_at ASC"
        );
        sqlx::query_as::<_, TickerItem>(&query).fetch_all(pool).await
    }

    /// Insert every item in one statement. An empty slice inserts nothing.
    ///
    /// Rows come back sorted by `order`.
    pub async fn insert_batch(
        conn: &mut PgConnection,
        items: &[NewTickerItem],
    ) -> Result<Vec<TickerItem>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = items.iter().map(|i| i.text.clone()).collect();
        let links: Vec<String> = items.iter().map(|i| i.link.clone()).collect();
        let actives: Vec<bool> = items.iter().map(|i| i.active).collect();
        let orders: Vec<i32> = items.iter().map(|i| i.order).collect();

        let query = format!(
            "INSERT INTO ticker_items (text, link, active, \"order\") \
             SELECT * FROM UNNEST($1::text[], $2::text[], $3::boolean[], $4::integer[]) \
             RETURNING {COLUMNS}"
        );
        let mut rows = sqlx::query_as::<_, TickerItem>(&query)
            .bind(&texts)
            .bind(&links)
            .bind(&actives)
            .bind(&orders)
            .fetch_all(conn)
            .await?;
        rows.sort_by_key(|row| row.order);
        Ok(rows)
    }

    /// Replace the active ticker with `items`.
    ///
    /// See [`ordered_list`] for the semantics of each [`ReplaceMode`].
    pub async fn replace_all(
        pool: &PgPool,
        items: &[NewTickerItem],
        mode: ReplaceMode,
    ) -> Result<Vec<TickerItem>, sqlx::Error> {
        match mode {
            ReplaceMode::TwoPhase => {
                let mut conn = pool.acquire().await?;
                let deactivated =
                    ordered_list::deactivate_active(&mut *conn, ListKind::Ticker).await?;
                tracing::debug!(deactivated, "Ticker items deactivated");
                Self::insert_batch(&mut *conn, items).await
            }
            ReplaceMode::Atomic => {
                let mut tx = pool.begin().await?;
                let deactivated =
                    ordered_list::deactivate_active(&mut *tx, ListKind::Ticker).await?;
                tracing::debug!(deactivated, "Ticker items deactivated");
                let rows = Self::insert_batch(&mut *tx, items).await?;
                tx.commit().await?;
                Ok(rows)
            }
        }
    }
}
