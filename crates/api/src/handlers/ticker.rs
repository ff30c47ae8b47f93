//! Handlers for the `/ticker` resource.
//!
//! The ticker is edited either by sending the whole list (`PUT /ticker`) or
//! through the caller's server-held draft (`/ticker/draft/...`). Both end in
//! the same replace-all save.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use newsdesk_core::cache::keys;
use newsdesk_core::content::{ListKind, TickerDraftItem, TickerItemPatch};
use newsdesk_core::ordering::{DraftItem, MoveOutcome, OrderedDraft};
use newsdesk_core::types::DbId;
use newsdesk_db::models::ticker_item::TickerItem;
use newsdesk_db::repositories::TickerItemRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ordering::{index_not_found, MoveRequest, MoveResponse};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

type TickerDraft = OrderedDraft<TickerDraftItem>;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The caller's draft, opened from the active rows when none exists yet.
async fn open_draft(state: &AppState, user_id: DbId) -> AppResult<TickerDraft> {
    let draft = state
        .drafts
        .ticker
        .get_or_open(user_id, || async {
            let rows = TickerItemRepo::list_active(&state.pool).await?;
            Ok::<_, AppError>(rows.into_iter().map(TickerDraftItem::from).collect())
        })
        .await?;
    Ok(draft)
}

/// Run a mutation against the caller's draft, opening it first.
async fn mutate_draft<R>(
    state: &AppState,
    user_id: DbId,
    f: impl FnOnce(&mut TickerDraft) -> R,
) -> AppResult<(R, TickerDraft)> {
    open_draft(state, user_id).await?;
    state
        .drafts
        .ticker
        .with_draft(user_id, |draft| (f(draft), draft.clone()))
        .await
        .ok_or_else(|| AppError::NotFound("Ticker draft was discarded".into()))
}

/// Validate and persist a draft with the configured replace mode.
///
/// On failure nothing about the caller's draft changes.
async fn persist(state: &AppState, draft: &TickerDraft) -> AppResult<Vec<TickerItem>> {
    let items = draft.to_submission()?;
    let rows = TickerItemRepo::replace_all(&state.pool, &items, state.config.replace_mode).await?;
    state
        .cache
        .invalidate_all(&[ListKind::Ticker.cache_key(), keys::stats()])
        .await;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/ticker
///
/// Active ticker items in display order.
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> AppResult<Json<DataResponse<Vec<TickerItem>>>> {
    let items = state
        .cache
        .get_or_load(ListKind::Ticker.cache_key(), || {
            TickerItemRepo::list_active(&state.pool)
        })
        .await?;
    Ok(Json(DataResponse { data: items }))
}

/// PUT /api/v1/ticker
///
/// Replace the whole list with the submitted items, in the order given.
/// Orders are renumbered from the list position. Any open draft of the
/// caller is dropped on success.
pub async fn replace(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(items): Json<Vec<TickerDraftItem>>,
) -> AppResult<Json<DataResponse<Vec<TickerItem>>>> {
    let mut draft = TickerDraft::new();
    draft.seed(items);
    let rows = persist(&state, &draft).await?;
    state.drafts.ticker.discard(user.user_id).await;

    tracing::info!(user_id = %user.user_id, count = rows.len(), "Ticker replaced");
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// GET /api/v1/ticker/draft
pub async fn get_draft(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<TickerDraft>>> {
    let draft = open_draft(&state, user.user_id).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// DELETE /api/v1/ticker/draft
pub async fn discard_draft(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<StatusCode> {
    state.drafts.ticker.discard(user.user_id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/ticker/draft/items
///
/// Append a new item at the end. Omitted fields start empty.
pub async fn append_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(patch): Json<TickerItemPatch>,
) -> AppResult<(StatusCode, Json<DataResponse<TickerDraft>>)> {
    let mut item = TickerDraftItem::blank();
    item.apply(patch);
    let ((), draft) = mutate_draft(&state, user.user_id, |d| d.append(item)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: draft })))
}

/// PATCH /api/v1/ticker/draft/items/{index}
pub async fn edit_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(index): Path<usize>,
    Json(patch): Json<TickerItemPatch>,
) -> AppResult<Json<DataResponse<TickerDraft>>> {
    let (edited, draft) = mutate_draft(&state, user.user_id, |d| d.edit(index, patch)).await?;
    if !edited {
        return Err(index_not_found(index, draft.len()));
    }
    Ok(Json(DataResponse { data: draft }))
}

/// DELETE /api/v1/ticker/draft/items/{index}
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(index): Path<usize>,
) -> AppResult<Json<DataResponse<TickerDraft>>> {
    let (removed, draft) = mutate_draft(&state, user.user_id, |d| d.remove(index)).await?;
    if removed.is_none() {
        return Err(index_not_found(index, draft.len()));
    }
    Ok(Json(DataResponse { data: draft }))
}

/// POST /api/v1/ticker/draft/items/{index}/move
///
/// Boundary moves (first up, last down) succeed without changing the list.
pub async fn move_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(index): Path<usize>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<DataResponse<MoveResponse<TickerDraftItem>>>> {
    let (outcome, draft) =
        mutate_draft(&state, user.user_id, |d| d.move_item(index, input.direction)).await?;
    if outcome == MoveOutcome::OutOfRange {
        return Err(index_not_found(index, draft.len()));
    }
    Ok(Json(DataResponse {
        data: MoveResponse { outcome, draft },
    }))
}

/// POST /api/v1/ticker/draft/save
///
/// Persist the caller's draft. The draft is dropped only on success, so a
/// failed save can be retried as-is.
pub async fn save_draft(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<TickerItem>>>> {
    let draft = open_draft(&state, user.user_id).await?;
    let rows = match persist(&state, &draft).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(user_id = %user.user_id, error = %err, "Ticker save failed; draft kept");
            return Err(err);
        }
    };
    state.drafts.ticker.discard(user.user_id).await;

    tracing::info!(user_id = %user.user_id, count = rows.len(), "Ticker draft saved");
    Ok(Json(DataResponse { data: rows }))
}
