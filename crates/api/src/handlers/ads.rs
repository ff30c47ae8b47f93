//! Handlers for the `/ads` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use newsdesk_core::ads::{
    default_window, is_running, validate_position, validate_title, validate_url,
    validate_window,
};
use newsdesk_core::cache::keys;
use newsdesk_core::error::CoreError;
use newsdesk_core::types::DbId;
use newsdesk_db::models::ad::{Ad, CreateAd, UpdateAd};
use newsdesk_db::repositories::AdRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /ads`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Only ads that are active and whose window contains today.
    #[serde(default)]
    pub running: bool,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Ad", id })
}

/// GET /api/v1/ads
///
/// All ads, newest first. `?running=true` keeps only the ads served today.
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Ad>>>> {
    let mut ads = state
        .cache
        .get_or_load(keys::ads(), || AdRepo::list(&state.pool))
        .await?;
    if params.running {
        let today = Utc::now().date_naive();
        ads.retain(|ad| is_running(ad.active, ad.start_date, ad.end_date, today));
    }
    Ok(Json(DataResponse { data: ads }))
}

/// GET /api/v1/ads/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Ad>>> {
    let ad = AdRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: ad }))
}

/// POST /api/v1/ads
///
/// Omitted dates default to a 30-day campaign starting today (or starting
/// at `start_date` when only that is given).
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateAd>,
) -> AppResult<(StatusCode, Json<DataResponse<Ad>>)> {
    validate_title(&input.title)?;
    validate_url("Image URL", &input.image_url)?;
    validate_url("Link URL", &input.link_url)?;
    validate_position(&input.position)?;

    let (default_start, default_end) =
        default_window(input.start_date.unwrap_or_else(|| Utc::now().date_naive()));
    let start_date = input.start_date.unwrap_or(default_start);
    let end_date = input.end_date.unwrap_or(default_end);
    validate_window(start_date, end_date)?;

    let input = CreateAd {
        start_date: Some(start_date),
        end_date: Some(end_date),
        active: Some(input.active.unwrap_or(true)),
        ..input
    };
    let ad = AdRepo::create(&state.pool, &input).await?;
    state.cache.invalidate(&keys::ads()).await;

    tracing::info!(ad_id = %ad.id, user_id = %user.user_id, position = %ad.position, "Ad created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: ad })))
}

/// PUT /api/v1/ads/{id}
///
/// Partial update. The campaign window is checked against the merged dates.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAd>,
) -> AppResult<Json<DataResponse<Ad>>> {
    let existing = AdRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(url) = &input.image_url {
        validate_url("Image URL", url)?;
    }
    if let Some(url) = &input.link_url {
        validate_url("Link URL", url)?;
    }
    if let Some(position) = &input.position {
        validate_position(position)?;
    }
    validate_window(
        input.start_date.unwrap_or(existing.start_date),
        input.end_date.unwrap_or(existing.end_date),
    )?;

    let ad = AdRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    state.cache.invalidate(&keys::ads()).await;

    tracing::info!(ad_id = %id, user_id = %user.user_id, "Ad updated");
    Ok(Json(DataResponse { data: ad }))
}

/// DELETE /api/v1/ads/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AdRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    state.cache.invalidate(&keys::ads()).await;

    tracing::info!(ad_id = %id, user_id = %user.user_id, "Ad deleted");
    Ok(StatusCode::NO_CONTENT)
}
