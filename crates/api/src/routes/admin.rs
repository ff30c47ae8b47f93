//! Route definitions for the `/admin` resource. Every route requires the
//! admin role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /users/search?q=           -> search
/// POST /users/{id}/toggle-admin   -> toggle_admin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/search", get(admin::search))
        .route("/users/{id}/toggle-admin", post(admin::toggle_admin))
}
