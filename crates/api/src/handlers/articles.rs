//! Handlers for the `/articles` resource: CRUD, image list edits, image
//! upload and view counting.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use newsdesk_cloud::object_key_for;
use newsdesk_core::article::{ArticleDraft, ArticlePatch, ArticleSubmission};
use newsdesk_core::cache::{keys, CacheKey};
use newsdesk_core::content::ListKind;
use newsdesk_core::error::CoreError;
use newsdesk_core::types::DbId;
use newsdesk_db::models::article::{Article, ArticleWithMeta};
use newsdesk_db::repositories::ArticleRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Image file extensions accepted by the upload endpoint.
const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /articles/{id}/images`.
#[derive(Debug, Deserialize)]
pub struct AddImageRequest {
    pub url: String,
}

/// Query parameters for `DELETE /articles/{id}/images`.
#[derive(Debug, Deserialize)]
pub struct RemoveImageQuery {
    pub url: String,
}

/// Result of removing an image URL from an article.
#[derive(Debug, Serialize)]
pub struct ImageRemoval {
    /// How many entries equal to the URL were dropped.
    pub removed: usize,
    pub article: Article,
}

/// Result of an image upload.
#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub key: String,
    pub url: String,
    /// The article the URL was appended to, when `article_id` was sent.
    pub article: Option<Article>,
}

/// Current view counter of an article.
#[derive(Debug, Serialize)]
pub struct ArticleViews {
    pub article_id: DbId,
    pub views: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Cache prefixes touched by any article write. The carousel list embeds
/// article titles.
fn invalidated_by_article_write() -> [CacheKey; 3] {
    [keys::articles(), keys::stats(), ListKind::Carousel.cache_key()]
}

async fn load_article(state: &AppState, id: DbId) -> AppResult<Article> {
    ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))
}

/// Persist an edited draft of an existing article.
async fn save_existing(state: &AppState, draft: ArticleDraft) -> AppResult<Article> {
    let ArticleSubmission::Update { id, fields } = draft.into_submission()? else {
        return Err(AppError::InternalError(
            "Draft of an existing article lost its id".into(),
        ));
    };
    let article = ArticleRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;
    state.cache.invalidate_all(&invalidated_by_article_write()).await;
    Ok(article)
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/articles
///
/// All articles, newest first, with view counts and author email.
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> AppResult<Json<DataResponse<Vec<ArticleWithMeta>>>> {
    let articles = state
        .cache
        .get_or_load(keys::articles(), || ArticleRepo::list_with_meta(&state.pool))
        .await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Article>>> {
    let article = load_article(&state, id).await?;
    Ok(Json(DataResponse { data: article }))
}

/// POST /api/v1/articles
///
/// Create an article from a full draft. Any `id` in the body is ignored;
/// the author is the signed-in user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(draft): Json<ArticleDraft>,
) -> AppResult<(StatusCode, Json<DataResponse<Article>>)> {
    let draft = ArticleDraft { id: None, ..draft };
    let ArticleSubmission::Create(fields) = draft.into_submission()? else {
        return Err(AppError::InternalError("Draft without id must create".into()));
    };

    let article = ArticleRepo::create(&state.pool, &fields, Some(user.user_id)).await?;
    state.cache.invalidate_all(&invalidated_by_article_write()).await;

    tracing::info!(article_id = %article.id, user_id = %user.user_id, "Article created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// POST /api/v1/articles/submit
///
/// Submit a full form draft. A draft carrying an `id` updates that article
/// (404 when it does not exist); otherwise a new article is created.
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(draft): Json<ArticleDraft>,
) -> AppResult<(StatusCode, Json<DataResponse<Article>>)> {
    match draft.into_submission()? {
        ArticleSubmission::Create(fields) => {
            let article = ArticleRepo::create(&state.pool, &fields, Some(user.user_id)).await?;
            state.cache.invalidate_all(&invalidated_by_article_write()).await;
            tracing::info!(article_id = %article.id, user_id = %user.user_id, "Article created");
            Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
        }
        ArticleSubmission::Update { id, fields } => {
            load_article(&state, id).await?;
            let article = ArticleRepo::update(&state.pool, id, &fields)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Article",
                    id,
                }))?;
            state.cache.invalidate_all(&invalidated_by_article_write()).await;
            tracing::info!(article_id = %id, user_id = %user.user_id, "Article updated");
            Ok((StatusCode::OK, Json(DataResponse { data: article })))
        }
    }
}

/// PUT /api/v1/articles/{id}
///
/// Apply a partial update. The article is read first so a missing id is
/// reported without issuing a write.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(patch): Json<ArticlePatch>,
) -> AppResult<Json<DataResponse<Article>>> {
    let mut draft = ArticleDraft::from(load_article(&state, id).await?);
    draft.apply(patch);
    let article = save_existing(&state, draft).await?;

    tracing::info!(article_id = %id, user_id = %user.user_id, "Article updated");
    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/articles/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_article(&state, id).await?;
    if !ArticleRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }));
    }
    state.cache.invalidate_all(&invalidated_by_article_write()).await;

    tracing::info!(article_id = %id, user_id = %user.user_id, "Article deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// POST /api/v1/articles/{id}/images
pub async fn add_image(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<AddImageRequest>,
) -> AppResult<Json<DataResponse<Article>>> {
    let mut draft = ArticleDraft::from(load_article(&state, id).await?);
    draft.add_image_url(&input.url)?;
    let article = save_existing(&state, draft).await?;

    tracing::info!(article_id = %id, user_id = %user.user_id, "Article image added");
    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/articles/{id}/images?url=
///
/// Removes every entry equal to `url`. Removing a URL that is not present
/// succeeds with `removed: 0` and writes nothing.
pub async fn remove_image(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Query(query): Query<RemoveImageQuery>,
) -> AppResult<Json<DataResponse<ImageRemoval>>> {
    let article = load_article(&state, id).await?;
    let mut draft = ArticleDraft::from(article.clone());
    let removed = draft.remove_image_url(&query.url);
    if removed == 0 {
        return Ok(Json(DataResponse {
            data: ImageRemoval { removed, article },
        }));
    }

    let article = save_existing(&state, draft).await?;
    tracing::info!(article_id = %id, user_id = %user.user_id, removed, "Article image removed");
    Ok(Json(DataResponse {
        data: ImageRemoval { removed, article },
    }))
}

/// POST /api/v1/articles/images/upload
///
/// Multipart form with a required `file` field and an optional `article_id`
/// field. The file is stored under `<unix-millis>-<sanitized name>`; when
/// `article_id` is given the public URL is also appended to that article.
pub async fn upload_image(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedImage>>)> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut article_id: Option<DbId> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            "article_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let id = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("Invalid article_id '{text}'")))?;
                article_id = Some(id);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    // Fail before storing anything when the target article is unknown.
    let target = match article_id {
        Some(id) => Some(load_article(&state, id).await?),
        None => None,
    };

    let key = object_key_for(&file_name);
    let size = data.len();
    let url = state.store.put(&key, data, content_type.as_deref()).await?;
    tracing::info!(
        key = %key,
        size,
        backend = state.store.backend_name(),
        user_id = %user.user_id,
        "Image uploaded"
    );

    let article = match target {
        Some(article) => match attach_upload(&state, article, &url).await {
            Ok(saved) => Some(saved),
            Err(err) => {
                discard_upload(&state, &key).await;
                return Err(err);
            }
        },
        None => None,
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadedImage { key, url, article },
        }),
    ))
}

/// Append a freshly stored image to `article` and save it.
async fn attach_upload(state: &AppState, article: Article, url: &str) -> AppResult<Article> {
    let mut draft = ArticleDraft::from(article);
    draft.add_image_url(url)?;
    save_existing(state, draft).await
}

/// Remove an object nothing refers to. Failures are logged only.
async fn discard_upload(state: &AppState, key: &str) {
    tracing::warn!(key = %key, "Image not attached to its article, removing the upload");
    if let Err(err) = state.store.delete(key).await {
        tracing::warn!(key = %key, error = %err, "Failed to remove orphaned upload");
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// POST /api/v1/articles/{id}/views
///
/// Public. Counts one view of an existing article. Cached lists and the
/// dashboard pick the new count up when their entries expire.
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ArticleViews>>> {
    load_article(&state, id).await?;
    ArticleRepo::increment_views(&state.pool, id).await?;
    let views = ArticleRepo::views(&state.pool, id).await?;

    tracing::debug!(article_id = %id, views, "Article view recorded");
    Ok(Json(DataResponse {
        data: ArticleViews {
            article_id: id,
            views,
        },
    }))
}
