//! Rows returned by the dashboard aggregate queries.

use newsdesk_core::dashboard::VisitedArticle;
use sqlx::FromRow;

/// One entry of the most-viewed articles query.
#[derive(Debug, Clone, FromRow)]
pub struct TopViewedRow {
    pub title: String,
    pub views: i64,
}

impl From<TopViewedRow> for VisitedArticle {
    fn from(row: TopViewedRow) -> Self {
        Self {
            title: row.title,
            views: row.views,
        }
    }
}
