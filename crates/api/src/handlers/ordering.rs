//! Request and response types shared by the ticker and carousel draft
//! endpoints.

use newsdesk_core::ordering::{Direction, MoveOutcome, OrderedDraft};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for `POST /{list}/draft/items/{index}/move`.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: Direction,
}

/// Response of a move: the outcome tag plus the resulting draft.
#[derive(Debug, Serialize)]
pub struct MoveResponse<T> {
    #[serde(flatten)]
    pub outcome: MoveOutcome,
    pub draft: OrderedDraft<T>,
}

/// A draft position that does not address an item.
pub fn index_not_found(index: usize, len: usize) -> AppError {
    AppError::NotFound(format!(
        "No draft item at index {index} (draft has {len} items)"
    ))
}
