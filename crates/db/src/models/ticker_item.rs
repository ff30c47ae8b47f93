//! Ticker item row.

use newsdesk_core::content::TickerDraftItem;
use newsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ticker_items` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TickerItem {
    pub id: DbId,
    pub text: String,
    pub link: String,
    pub active: bool,
    pub order: i32,
    pub created_at: Timestamp,
}

impl From<TickerItem> for TickerDraftItem {
    fn from(row: TickerItem) -> Self {
        Self {
            id: Some(row.id),
            text: row.text,
            link: row.link,
            active: row.active,
            order: row.order,
            created_at: Some(row.created_at),
        }
    }
}
