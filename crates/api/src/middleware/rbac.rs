//! Access-level extractors for the newsroom panel.
//!
//! Staff reach every content endpoint; only admins reach the user panel.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use newsdesk_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Any signed-in staff member, admin or not.
///
/// Same checks as [`AuthUser`]; handlers use it to read as "needs a session".
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::from_request_parts(parts, state).await.map(Self)
    }
}

/// A signed-in admin. Staff without the flag get 403.
///
/// The flag comes from the user row loaded for this request, so a toggle in
/// the user panel applies without a new login.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.is_admin {
            Ok(Self(user))
        } else {
            tracing::warn!(user_id = %user.user_id, "Admin endpoint refused");
            Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )))
        }
    }
}
