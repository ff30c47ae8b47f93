//! Handlers for the `/carousel` resource.
//!
//! Same shape as the ticker endpoints. Saves additionally check that every
//! item points at an existing article before anything is written.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use newsdesk_core::cache::keys;
use newsdesk_core::content::{CarouselDraftItem, CarouselItemPatch, ListKind};
use newsdesk_core::error::CoreError;
use newsdesk_core::ordering::{DraftItem, MoveOutcome, OrderedDraft};
use newsdesk_core::types::DbId;
use newsdesk_db::models::carousel_item::{CarouselItem, CarouselItemWithArticle};
use newsdesk_db::repositories::{ArticleRepo, CarouselItemRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ordering::{index_not_found, MoveRequest, MoveResponse};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

type CarouselDraft = OrderedDraft<CarouselDraftItem>;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The caller's draft, opened from the active rows when none exists yet.
async fn open_draft(state: &AppState, user_id: DbId) -> AppResult<CarouselDraft> {
    let draft = state
        .drafts
        .carousel
        .get_or_open(user_id, || async {
            let rows = CarouselItemRepo::list_active(&state.pool).await?;
            Ok::<_, AppError>(rows.into_iter().map(CarouselDraftItem::from).collect())
        })
        .await?;
    Ok(draft)
}

/// Run a mutation against the caller's draft, opening it first.
async fn mutate_draft<R>(
    state: &AppState,
    user_id: DbId,
    f: impl FnOnce(&mut CarouselDraft) -> R,
) -> AppResult<(R, CarouselDraft)> {
    open_draft(state, user_id).await?;
    state
        .drafts
        .carousel
        .with_draft(user_id, |draft| (f(draft), draft.clone()))
        .await
        .ok_or_else(|| AppError::NotFound("Carousel draft was discarded".into()))
}

/// Validate and persist a draft with the configured replace mode.
///
/// On failure nothing about the caller's draft changes.
async fn persist(state: &AppState, draft: &CarouselDraft) -> AppResult<Vec<CarouselItem>> {
    let items = draft.to_submission()?;

    let mut wanted: Vec<DbId> = items.iter().map(|item| item.article_id).collect();
    wanted.sort_unstable();
    wanted.dedup();
    let existing = ArticleRepo::existing_ids(&state.pool, &wanted).await?;
    if let Some((index, item)) = items
        .iter()
        .enumerate()
        .find(|(_, item)| !existing.contains(&item.article_id))
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Item {index}: article {} does not exist",
            item.article_id
        ))));
    }

    let rows =
        CarouselItemRepo::replace_all(&state.pool, &items, state.config.replace_mode).await?;
    state
        .cache
        .invalidate_all(&[ListKind::Carousel.cache_key(), keys::stats()])
        .await;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/carousel
///
/// Active carousel items in display order, with the featured article titles.
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> AppResult<Json<DataResponse<Vec<CarouselItemWithArticle>>>> {
    let items = state
        .cache
        .get_or_load(ListKind::Carousel.cache_key(), || {
            CarouselItemRepo::list_active(&state.pool)
        })
        .await?;
    Ok(Json(DataResponse { data: items }))
}

/// PUT /api/v1/carousel
///
/// Replace the whole list with the submitted items, in the order given.
/// Orders are renumbered from the list position. Any open draft of the
/// caller is dropped on success.
pub async fn replace(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(items): Json<Vec<CarouselDraftItem>>,
) -> AppResult<Json<DataResponse<Vec<CarouselItem>>>> {
    let mut draft = CarouselDraft::new();
    draft.seed(items);
    let rows = persist(&state, &draft).await?;
    state.drafts.carousel.discard(user.user_id).await;

    tracing::info!(user_id = %user.user_id, count = rows.len(), "Carousel replaced");
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// GET /api/v1/carousel/draft
pub async fn get_draft(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<CarouselDraft>>> {
    let draft = open_draft(&state, user.user_id).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// DELETE /api/v1/carousel/draft
pub async fn discard_draft(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<StatusCode> {
    state.drafts.carousel.discard(user.user_id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/carousel/draft/items
///
/// Append a new item at the end. `article_id` may be picked later.
pub async fn append_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(patch): Json<CarouselItemPatch>,
) -> AppResult<(StatusCode, Json<DataResponse<CarouselDraft>>)> {
    let mut item = CarouselDraftItem::blank();
    item.apply(patch);
    let ((), draft) = mutate_draft(&state, user.user_id, |d| d.append(item)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: draft })))
}

/// PATCH /api/v1/carousel/draft/items/{index}
pub async fn edit_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(index): Path<usize>,
    Json(patch): Json<CarouselItemPatch>,
) -> AppResult<Json<DataResponse<CarouselDraft>>> {
    let (edited, draft) = mutate_draft(&state, user.user_id, |d| d.edit(index, patch)).await?;
    if !edited {
        return Err(index_not_found(index, draft.len()));
    }
    Ok(Json(DataResponse { data: draft }))
}

/// DELETE /api/v1/carousel/draft/items/{index}
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(index): Path<usize>,
) -> AppResult<Json<DataResponse<CarouselDraft>>> {
    let (removed, draft) = mutate_draft(&state, user.user_id, |d| d.remove(index)).await?;
    if removed.is_none() {
        return Err(index_not_found(index, draft.len()));
    }
    Ok(Json(DataResponse { data: draft }))
}

/// POST /api/v1/carousel/draft/items/{index}/move
///
/// Boundary moves (first up, last down) succeed without changing the list.
pub async fn move_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(index): Path<usize>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<DataResponse<MoveResponse<CarouselDraftItem>>>> {
    let (outcome, draft) =
        mutate_draft(&state, user.user_id, |d| d.move_item(index, input.direction)).await?;
    if outcome == MoveOutcome::OutOfRange {
        return Err(index_not_found(index, draft.len()));
    }
    Ok(Json(DataResponse {
        data: MoveResponse { outcome, draft },
    }))
}

/// POST /api/v1/carousel/draft/save
///
/// Persist the caller's draft. The draft is dropped only on success, so a
/// failed save can be retried as-is.
pub async fn save_draft(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<CarouselItem>>>> {
    let draft = open_draft(&state, user.user_id).await?;
    let rows = match persist(&state, &draft).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(user_id = %user.user_id, error = %err, "Carousel save failed; draft kept");
            return Err(err);
        }
    };
    state.drafts.carousel.discard(user.user_id).await;

    tracing::info!(user_id = %user.user_id, count = rows.len(), "Carousel draft saved");
    Ok(Json(DataResponse { data: rows }))
}
