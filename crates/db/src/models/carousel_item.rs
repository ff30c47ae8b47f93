//! Carousel item rows.

use newsdesk_core::content::CarouselDraftItem;
use newsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `carousel_items` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CarouselItem {
    pub id: DbId,
    pub article_id: DbId,
    pub active: bool,
    pub order: i32,
    pub created_at: Timestamp,
}

/// A carousel row joined with the title of the article it features.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CarouselItemWithArticle {
    pub id: DbId,
    pub article_id: DbId,
    pub active: bool,
    pub order: i32,
    pub created_at: Timestamp,
    pub article_title: String,
}

impl From<CarouselItem> for CarouselDraftItem {
    fn from(row: CarouselItem) -> Self {
        Self {
            id: Some(row.id),
            article_id: Some(row.article_id),
            active: row.active,
            order: row.order,
            created_at: Some(row.created_at),
        }
    }
}

impl From<CarouselItemWithArticle> for CarouselDraftItem {
    fn from(row: CarouselItemWithArticle) -> Self {
        Self {
            id: Some(row.id),
            article_id: Some(row.article_id),
            active: row.active,
            order: row.order,
            created_at: Some(row.created_at),
        }
    }
}
