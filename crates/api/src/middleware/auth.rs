//! Session-backed authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use newsdesk_core::error::CoreError;
use newsdesk_core::roles::role_for;
use newsdesk_core::types::DbId;
use newsdesk_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token only identifies the session. The session must still be live
/// (not revoked, not expired) and the admin flag is read from the `users`
/// row on every request, so a role change applies without a new login.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The `user_sessions` row the token was issued for.
    pub session_id: DbId,
    /// Current value of `users.is_admin`.
    pub is_admin: bool,
    /// `"admin"` or `"staff"`, derived from `is_admin`.
    pub role: &'static str,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let session = SessionRepo::find_live(&state.pool, claims.sid)
            .await?
            .filter(|session| session.user_id == claims.sub)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Session has ended".into()))
            })?;

        let user = UserRepo::find_by_id(&state.pool, session.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
            })?;

        Ok(AuthUser {
            user_id: user.id,
            session_id: session.id,
            is_admin: user.is_admin,
            role: role_for(user.is_admin),
        })
    }
}
