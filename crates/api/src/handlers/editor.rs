//! Handler for the rich text editor configuration.

use axum::extract::State;
use axum::Json;
use newsdesk_core::editor::EditorConfig;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/editor/config
///
/// 503 `CONFIGURATION_ERROR` when `EDITOR_API_KEY` is not set.
pub async fn config(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> AppResult<Json<DataResponse<EditorConfig>>> {
    let config = EditorConfig::from_api_key(state.config.editor_api_key.as_deref())?;
    Ok(Json(DataResponse { data: config }))
}
