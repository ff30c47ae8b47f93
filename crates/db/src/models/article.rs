//! Article models.

use newsdesk_core::article::ArticleDraft;
use newsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Article {
    pub id: DbId,
    pub created_at: Timestamp,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Vec<String>,
    pub category: String,
    pub author_id: Option<DbId>,
    pub author_name: String,
    pub read_time: String,
    pub video_url: Option<String>,
}

/// Article row enriched with its view counter and the author's email, as
/// shown in the article list.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ArticleWithMeta {
    pub id: DbId,
    pub created_at: Timestamp,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Vec<String>,
    pub category: String,
    pub author_id: Option<DbId>,
    pub author_name: String,
    pub read_time: String,
    pub video_url: Option<String>,
    /// Zero when the article has never been viewed.
    pub views: i64,
    pub author_email: Option<String>,
}

impl From<Article> for ArticleDraft {
    fn from(article: Article) -> Self {
        Self {
            id: Some(article.id),
            title: article.title,
            excerpt: article.excerpt,
            content: article.content,
            image_url: article.image_url,
            category: article.category,
            author_name: article.author_name,
            read_time: article.read_time,
            video_url: article.video_url,
        }
    }
}
