//! Route definitions for the `/carousel` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::carousel;
use crate::state::AppState;

/// Routes mounted at `/carousel`.
///
/// ```text
/// GET    /                          -> list
/// PUT    /                          -> replace
/// GET    /draft                     -> get_draft
/// DELETE /draft                     -> discard_draft
/// POST   /draft/items               -> append_item
/// PATCH  /draft/items/{index}       -> edit_item
/// DELETE /draft/items/{index}       -> remove_item
/// POST   /draft/items/{index}/move  -> move_item
/// POST   /draft/save                -> save_draft
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(carousel::list).put(carousel::replace))
        .route(
            "/draft",
            get(carousel::get_draft).delete(carousel::discard_draft),
        )
        .route("/draft/items", post(carousel::append_item))
        .route(
            "/draft/items/{index}",
            patch(carousel::edit_item).delete(carousel::remove_item),
        )
        .route("/draft/items/{index}/move", post(carousel::move_item))
        .route("/draft/save", post(carousel::save_draft))
}
