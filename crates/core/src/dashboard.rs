//! Dashboard summary types and the merge of independent aggregate queries.

use serde::{Deserialize, Serialize};

/// Number of most-viewed articles shown on the dashboard.
pub const TOP_VIEWED_LIMIT: i64 = 5;

/// Raw results of the independent count queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total_articles: i64,
    pub total_authors: i64,
    pub active_ticker_items: i64,
    pub active_carousel_items: i64,
    pub total_views: i64,
}

/// One entry of the most-viewed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitedArticle {
    pub title: String,
    pub views: i64,
}

/// Read-only dashboard summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_articles: i64,
    pub total_authors: i64,
    pub active_ticker_items: i64,
    pub active_carousel_items: i64,
    pub total_views: i64,
    pub visited_news: Vec<VisitedArticle>,
}

/// Merge the count results and the top-viewed list into one summary.
///
/// Counts are clamped to zero. The most-viewed list is sorted by views
/// descending and truncated to [`TOP_VIEWED_LIMIT`].
pub fn summarize(counts: DashboardCounts, mut top: Vec<VisitedArticle>) -> DashboardStats {
    top.sort_by(|a, b| b.views.cmp(&a.views));
    top.truncate(TOP_VIEWED_LIMIT as usize);
    DashboardStats {
        total_articles: counts.total_articles.max(0),
        total_authors: counts.total_authors.max(0),
        active_ticker_items: counts.active_ticker_items.max(0),
        active_carousel_items: counts.active_carousel_items.max(0),
        total_views: counts.total_views.max(0),
        visited_news: top,
    }
}
