use axum::routing::get;
use axum::Router;

use crate::handlers::editor;
use crate::state::AppState;

/// Routes mounted at `/editor`.
pub fn router() -> Router<AppState> {
    Router::new().route("/config", get(editor::config))
}
