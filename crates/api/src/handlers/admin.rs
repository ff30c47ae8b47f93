//! Handlers for the `/admin/users` resource (search and admin toggle).

use axum::extract::{Path, Query, State};
use axum::Json;
use newsdesk_core::cache::keys;
use newsdesk_core::error::CoreError;
use newsdesk_core::types::DbId;
use newsdesk_core::users::{email_search_pattern, search_enabled, USER_SEARCH_LIMIT};
use newsdesk_db::models::user::UserSummary;
use newsdesk_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /admin/users/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// GET /api/v1/admin/users/search?q=
///
/// Queries of two characters or fewer return an empty list without touching
/// the database. The query is used as typed (no trimming).
pub async fn search(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<UserSummary>>>> {
    if !search_enabled(&params.q) {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }

    let pattern = email_search_pattern(&params.q);
    let users = state
        .cache
        .get_or_load(keys::user_search(&params.q), || {
            UserRepo::search_by_email(&state.pool, &pattern, USER_SEARCH_LIMIT)
        })
        .await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/admin/users/{id}/toggle-admin
///
/// Flip the user's admin flag. Returns the user with the new flag.
pub async fn toggle_admin(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserSummary>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let new_status = !user.is_admin;
    UserRepo::set_admin_status(&state.pool, id, new_status).await?;
    state.cache.invalidate(&keys::users()).await;

    tracing::info!(
        target_user_id = %id,
        admin_user_id = %admin.user_id,
        is_admin = new_status,
        "Admin status toggled"
    );

    Ok(Json(DataResponse {
        data: UserSummary {
            id: user.id,
            email: user.email,
            is_admin: new_status,
        },
    }))
}
