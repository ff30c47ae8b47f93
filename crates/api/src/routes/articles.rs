//! Route definitions for the `/articles` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Largest accepted image upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Routes mounted at `/articles`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// POST   /submit            -> submit
/// POST   /images/upload     -> upload_image (multipart)
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// POST   /{id}/images       -> add_image
/// DELETE /{id}/images?url=  -> remove_image
/// POST   /{id}/views        -> record_view (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(articles::list).post(articles::create))
        .route("/submit", post(articles::submit))
        .route(
            "/images/upload",
            post(articles::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/{id}",
            get(articles::get_by_id)
                .put(articles::update)
                .delete(articles::delete),
        )
        .route(
            "/{id}/images",
            post(articles::add_image).delete(articles::remove_image),
        )
        .route("/{id}/views", post(articles::record_view))
}
