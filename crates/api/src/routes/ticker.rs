//! Route definitions for the `/ticker` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::ticker;
use crate::state::AppState;

/// Routes mounted at `/ticker`.
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
        .route("/", get(ticker::list).put(ticker::replace))
        .route(
            "/draft",
            get(ticker::get_draft).delete(ticker::discard_draft),
        )
        .route("/draft/items", post(ticker::append_item))
        .route(
            "/draft/items/{index}",
            patch(ticker::edit_item).delete(ticker::remove_item),
        )
        .route("/draft/items/{index}/move", post(ticker::move_item))
        .route("/draft/save", post(ticker::save_draft))
}
