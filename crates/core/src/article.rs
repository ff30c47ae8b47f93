//! Article editor: draft state, partial updates, image list handling and
//! the create-vs-update submission decision.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API/repository layer and any future CLI tooling.

use serde::{Deserialize, Serialize};

use crate::content::is_http_url;
use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Category constants
// ---------------------------------------------------------------------------

pub const CATEGORY_TECHNOLOGY: &str = "Tecnología";
pub const CATEGORY_POLITICS: &str = "Política";
pub const CATEGORY_BUSINESS: &str = "Negocios";
pub const CATEGORY_ENTERTAINMENT: &str = "Entretenimiento";
pub const CATEGORY_SPORTS: &str = "Deportes";
pub const CATEGORY_SCIENCE: &str = "Ciencia";
pub const CATEGORY_HEALTH: &str = "Salud";

/// All valid article categories, in menu order.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_TECHNOLOGY,
    CATEGORY_POLITICS,
    CATEGORY_BUSINESS,
    CATEGORY_ENTERTAINMENT,
    CATEGORY_SPORTS,
    CATEGORY_SCIENCE,
    CATEGORY_HEALTH,
];

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum excerpt length in characters.
pub const MAX_EXCERPT_LEN: usize = 500;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// The editable columns of an article, as sent to the repository on create
/// or update. Server-computed and read-only data (views, author email,
/// creation timestamp, author reference) is never part of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleFields {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Vec<String>,
    pub category: String,
    pub author_name: String,
    pub read_time: String,
    pub video_url: Option<String>,
}

/// Outcome of submitting an [`ArticleDraft`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleSubmission {
    Create(ArticleFields),
    Update { id: DbId, fields: ArticleFields },
}

/// Partial update for an article draft. Each field left `None` is kept.
///
/// `video_url: Some("")` clears the video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<Vec<String>>,
    pub category: Option<String>,
    pub author_name: Option<String>,
    pub read_time: Option<String>,
    pub video_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Form state bound to a single article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl ArticleDraft {
    /// Empty defaults for a brand new article.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge a partial update into the draft.
    pub fn apply(&mut self, patch: ArticlePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(images) = patch.image_url {
            self.image_url = images;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(author_name) = patch.author_name {
            self.author_name = author_name;
        }
        if let Some(read_time) = patch.read_time {
            self.read_time = read_time;
        }
        if let Some(video_url) = patch.video_url {
            self.video_url = if video_url.trim().is_empty() {
                None
            } else {
                Some(video_url)
            };
        }
    }

    /// Append an image URL (typed in, or returned by an upload).
    pub fn add_image_url(&mut self, url: &str) -> Result<(), CoreError> {
        validate_image_url(url)?;
        self.image_url.push(url.trim().to_string());
        Ok(())
    }

    /// Remove every image entry equal to `url` and return how many were removed.
    ///
    /// Removal is by value: duplicate URLs cannot be removed one at a time.
    pub fn remove_image_url(&mut self, url: &str) -> usize {
        let before = self.image_url.len();
        self.image_url.retain(|existing| existing != url);
        before - self.image_url.len()
    }

    /// Check every field the form requires.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_excerpt(&self.excerpt)?;
        require_non_empty("Content", &self.content)?;
        validate_category(&self.category)?;
        require_non_empty("Read time", &self.read_time)?;
        for url in &self.image_url {
            validate_image_url(url)?;
        }
        if let Some(video) = &self.video_url {
            if !is_http_url(video.trim()) {
                return Err(CoreError::Validation(format!(
                    "Video URL '{video}' must be an http(s) URL"
                )));
            }
        }
        Ok(())
    }

    /// Validate and decide between create and update by the presence of `id`.
    pub fn into_submission(self) -> Result<ArticleSubmission, CoreError> {
        self.validate()?;
        let id = self.id;
        let fields = ArticleFields {
            title: self.title.trim().to_string(),
            excerpt: self.excerpt.trim().to_string(),
            content: self.content,
            image_url: self.image_url,
            category: self.category,
            author_name: self.author_name.trim().to_string(),
            read_time: self.read_time.trim().to_string(),
            video_url: self.video_url.map(|v| v.trim().to_string()),
        };
        Ok(match id {
            Some(id) => ArticleSubmission::Update { id, fields },
            None => ArticleSubmission::Create(fields),
        })
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an article title (non-empty, bounded length).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    require_non_empty("Title", title)?;
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an article excerpt (non-empty, bounded length).
pub fn validate_excerpt(excerpt: &str) -> Result<(), CoreError> {
    require_non_empty("Excerpt", excerpt)?;
    if excerpt.chars().count() > MAX_EXCERPT_LEN {
        return Err(CoreError::Validation(format!(
            "Excerpt must be at most {MAX_EXCERPT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an article category against the known set.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if !VALID_CATEGORIES.contains(&category) {
        return Err(CoreError::Validation(format!(
            "Invalid category '{}'. Valid categories: {}",
            category,
            VALID_CATEGORIES.join(", ")
        )));
    }
    Ok(())
}

/// Validate an image URL.
pub fn validate_image_url(url: &str) -> Result<(), CoreError> {
    if is_http_url(url.trim()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Image URL '{url}' must be an http(s) URL"
        )))
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_draft() -> ArticleDraft {
        ArticleDraft {
            id: None,
            title: "Election results".into(),
            excerpt: "Who won, and by how much".into(),
            content: "<p>Full story</p>".into(),
            image_url: vec!["https://cdn.example.com/a.jpg".into()],
            category: CATEGORY_POLITICS.into(),
            author_name: "Redacción".into(),
            read_time: "5 min".into(),
            video_url: None,
        }
    }

    #[test]
    fn draft_without_id_creates() {
        assert_matches!(
            valid_draft().into_submission(),
            Ok(ArticleSubmission::Create(fields)) if fields.title == "Election results"
        );
    }

    #[test]
    fn draft_with_id_updates() {
        let id = uuid::Uuid::new_v4();
        let draft = ArticleDraft {
            id: Some(id),
            ..valid_draft()
        };
        assert_matches!(
            draft.into_submission(),
            Ok(ArticleSubmission::Update { id: got, .. }) if got == id
        );
    }

    #[test]
    fn remove_image_drops_all_duplicates() {
        let mut draft = valid_draft();
        draft.add_image_url("https://cdn.example.com/b.jpg").unwrap();
        draft.add_image_url("https://cdn.example.com/a.jpg").unwrap();
        assert_eq!(draft.image_url.len(), 3);

        let removed = draft.remove_image_url("https://cdn.example.com/a.jpg");
        assert_eq!(removed, 2);
        assert_eq!(draft.image_url, vec!["https://cdn.example.com/b.jpg"]);
    }

    #[test]
    fn remove_unknown_image_is_noop() {
        let mut draft = valid_draft();
        assert_eq!(draft.remove_image_url("https://elsewhere/x.png"), 0);
        assert_eq!(draft.image_url.len(), 1);
    }

    #[test]
    fn add_image_rejects_non_http() {
        let mut draft = valid_draft();
        assert!(draft.add_image_url("not a url").is_err());
        assert_eq!(draft.image_url.len(), 1);
    }

    #[test]
    fn empty_image_list_is_valid() {
        let draft = ArticleDraft {
            image_url: vec![],
            ..valid_draft()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let mut draft = valid_draft();
        draft.apply(ArticlePatch {
            title: Some("New title".into()),
            video_url: Some("https://video.example.com/v".into()),
            ..Default::default()
        });
        assert_eq!(draft.title, "New title");
        assert_eq!(draft.excerpt, "Who won, and by how much");
        assert_eq!(draft.video_url.as_deref(), Some("https://video.example.com/v"));

        draft.apply(ArticlePatch {
            video_url: Some(String::new()),
            ..Default::default()
        });
        assert!(draft.video_url.is_none());
    }

    #[test]
    fn invalid_category_rejected() {
        let draft = ArticleDraft {
            category: "Gossip".into(),
            ..valid_draft()
        };
        assert_matches!(draft.validate(), Err(CoreError::Validation(msg)) if msg.contains("Gossip"));
    }

    #[test]
    fn empty_form_fails_validation() {
        assert!(ArticleDraft::empty().into_submission().is_err());
    }

    #[test]
    fn title_length_limit() {
        assert!(validate_title(&"t".repeat(MAX_TITLE_LEN)).is_ok());
        assert!(validate_title(&"t".repeat(MAX_TITLE_LEN + 1)).is_err());
    }
}
