use std::sync::Arc;

use newsdesk_cloud::ObjectStore;
use newsdesk_core::cache::QueryCache;

use crate::config::ServerConfig;
use crate::drafts::DraftStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: newsdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cached read results, invalidated by prefix on writes.
    pub cache: Arc<QueryCache>,
    /// Per-user ticker and carousel editing drafts.
    pub drafts: Arc<DraftStore>,
    /// Backend for uploaded article images.
    pub store: Arc<dyn ObjectStore>,
}
