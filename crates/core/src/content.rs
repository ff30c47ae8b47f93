//! Ticker and carousel draft items.
//!
//! These are the element types edited through
//! [`OrderedDraft`](crate::ordering::OrderedDraft) and persisted with the
//! replace-all protocol.

use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::cache::CacheKey;
use crate::error::CoreError;
use crate::ordering::DraftItem;
use crate::types::{DbId, Timestamp};

/// Maximum length of a ticker headline.
pub const MAX_TICKER_TEXT_LEN: usize = 280;

// ---------------------------------------------------------------------------
// List kinds
// ---------------------------------------------------------------------------

/// The two ordered content lists managed through the ordering editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ticker,
    Carousel,
}

impl ListKind {
    pub fn table(self) -> &'static str {
        match self {
            Self::Ticker => "ticker_items",
            Self::Carousel => "carousel_items",
        }
    }

    pub fn cache_key(self) -> CacheKey {
        match self {
            Self::Ticker => CacheKey::root("ticker"),
            Self::Carousel => CacheKey::root("carousel"),
        }
    }
}

// ---------------------------------------------------------------------------
// Ticker
// ---------------------------------------------------------------------------

/// A ticker entry as held in an editing draft.
///
/// `id` and `created_at` are present for rows that came from the database and
/// absent for rows appended locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerDraftItem {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl TickerDraftItem {
    /// A blank entry, as produced by the "add item" action.
    pub fn blank() -> Self {
        Self {
            id: None,
            text: String::new(),
            link: String::new(),
            active: true,
            order: 0,
            created_at: None,
        }
    }
}

/// Partial update for a ticker draft item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickerItemPatch {
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Insert payload for one ticker row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTickerItem {
    pub text: String,
    pub link: String,
    pub active: bool,
    pub order: i32,
}

impl DraftItem for TickerDraftItem {
    type Patch = TickerItemPatch;
    type Submission = NewTickerItem;

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn apply(&mut self, patch: TickerItemPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
    }

    fn to_submission(&self) -> Result<NewTickerItem, CoreError> {
        validate_ticker_text(&self.text)?;
        validate_link(&self.link)?;
        Ok(NewTickerItem {
            text: self.text.trim().to_string(),
            link: self.link.trim().to_string(),
            active: true,
            order: self.order,
        })
    }
}

/// Validate a ticker headline (non-empty, bounded length).
pub fn validate_ticker_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("Ticker text must not be empty".into()));
    }
    if text.chars().count() > MAX_TICKER_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "Ticker text must be at most {MAX_TICKER_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a ticker link. Absolute http(s) URLs and site-relative paths are accepted.
pub fn validate_link(link: &str) -> Result<(), CoreError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(CoreError::Validation("Ticker link must not be empty".into()));
    }
    if link.starts_with('/') || is_http_url(link) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Ticker link '{link}' must be an http(s) URL or a path starting with '/'"
    )))
}

/// True for syntactically valid absolute `http`/`https` URLs.
pub fn is_http_url(value: &str) -> bool {
    (value.starts_with("http://") || value.starts_with("https://")) && value.validate_url()
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// A carousel entry as held in an editing draft.
///
/// `article_id` is `None` until an article has been picked for a freshly
/// appended entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselDraftItem {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub article_id: Option<DbId>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl CarouselDraftItem {
    pub fn blank() -> Self {
        Self {
            id: None,
            article_id: None,
            active: true,
            order: 0,
            created_at: None,
        }
    }
}

/// Partial update for a carousel draft item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarouselItemPatch {
    pub article_id: Option<DbId>,
}

/// Insert payload for one carousel row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCarouselItem {
    pub article_id: DbId,
    pub active: bool,
    pub order: i32,
}

impl DraftItem for CarouselDraftItem {
    type Patch = CarouselItemPatch;
    type Submission = NewCarouselItem;

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn apply(&mut self, patch: CarouselItemPatch) {
        if let Some(article_id) = patch.article_id {
            self.article_id = Some(article_id);
        }
    }

    fn to_submission(&self) -> Result<NewCarouselItem, CoreError> {
        let article_id = self.article_id.ok_or_else(|| {
            CoreError::Validation("Carousel item has no article selected".into())
        })?;
        Ok(NewCarouselItem {
            article_id,
            active: true,
            order: self.order,
        })
    }
}

fn default_active() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::OrderedDraft;

    fn ticker(text: &str, order: i32, active: bool) -> TickerDraftItem {
        TickerDraftItem {
            id: Some(uuid::Uuid::new_v4()),
            text: text.to_string(),
            link: "https://news.example.com/a".to_string(),
            active,
            order,
            created_at: Some(chrono::Utc::now()),
        }
    }

    #[test]
    fn submission_strips_identity_and_forces_active() {
        let mut draft = OrderedDraft::new();
        draft.seed(vec![ticker("A", 0, false), ticker("B", 1, true)]);
        draft.append(TickerDraftItem {
            text: "C".into(),
            link: "/sports".into(),
            ..TickerDraftItem::blank()
        });

        let payload = draft.to_submission().unwrap();
        assert_eq!(payload.len(), 3);
        assert!(payload.iter().all(|item| item.active));
        assert_eq!(
            payload.iter().map(|i| i.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        // The draft itself keeps its identities for a retry.
        assert!(draft.items()[0].id.is_some());
    }

    #[test]
    fn blank_ticker_fails_validation() {
        let err = TickerDraftItem::blank().to_submission().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn ticker_patch_only_touches_given_fields() {
        let mut item = ticker("A", 0, true);
        item.apply(TickerItemPatch {
            text: Some("Breaking".into()),
            link: None,
        });
        assert_eq!(item.text, "Breaking");
        assert_eq!(item.link, "https://news.example.com/a");
    }

    #[test]
    fn link_validation() {
        assert!(validate_link("https://example.com/story").is_ok());
        assert!(validate_link("/local/path").is_ok());
        assert!(validate_link("").is_err());
        assert!(validate_link("javascript:alert(1)").is_err());
        assert!(validate_link("ftp://example.com").is_err());
    }

    #[test]
    fn ticker_text_length_limit() {
        assert!(validate_ticker_text(&"x".repeat(MAX_TICKER_TEXT_LEN)).is_ok());
        assert!(validate_ticker_text(&"x".repeat(MAX_TICKER_TEXT_LEN + 1)).is_err());
        assert!(validate_ticker_text("   ").is_err());
    }

    #[test]
    fn carousel_requires_article() {
        assert!(CarouselDraftItem::blank().to_submission().is_err());

        let article_id = uuid::Uuid::new_v4();
        let mut item = CarouselDraftItem::blank();
        item.active = false;
        item.apply(CarouselItemPatch {
            article_id: Some(article_id),
        });
        let new = item.to_submission().unwrap();
        assert_eq!(new.article_id, article_id);
        assert!(new.active);
    }

    #[test]
    fn draft_item_deserializes_with_defaults() {
        let item: TickerDraftItem =
            serde_json::from_value(serde_json::json!({ "text": "Hi" })).unwrap();
        assert!(item.active);
        assert!(item.id.is_none());
        assert_eq!(item.link, "");
    }

    #[test]
    fn list_kind_tables() {
        assert_eq!(ListKind::Ticker.table(), "ticker_items");
        assert_eq!(ListKind::Carousel.table(), "carousel_items");
    }
}
