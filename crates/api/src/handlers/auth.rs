//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use newsdesk_core::error::CoreError;
use newsdesk_core::roles::role_for;
use newsdesk_db::models::user::UserResponse;
use newsdesk_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token and session lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Opens a session and returns a token
/// bound to it.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        ))
    };

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = %user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    let ttl = state.config.jwt.session_ttl();
    let session = SessionRepo::create(&state.pool, user.id, Utc::now() + ttl).await?;

    let access_token = generate_access_token(&session, role_for(user.is_admin), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, session_id = %session.id, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: ttl.num_seconds(),
        user: UserResponse::from(&user),
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the current session and drop its ordering drafts. Returns 204.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke(&state.pool, auth_user.session_id).await?;
    state.drafts.ticker.discard(auth_user.user_id).await;
    state.drafts.carousel.discard(auth_user.user_id).await;

    tracing::info!(user_id = %auth_user.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}
