//! Success envelope. Errors use the `{error, code}` shape from
//! [`AppError`](crate::error::AppError). Login and `/health` answer without
//! the envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
