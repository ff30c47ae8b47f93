//! Handler for the dashboard summary.

use axum::extract::State;
use axum::Json;
use newsdesk_core::cache::keys;
use newsdesk_core::content::ListKind;
use newsdesk_core::dashboard::{
    summarize, DashboardCounts, DashboardStats, VisitedArticle, TOP_VIEWED_LIMIT,
};
use newsdesk_db::repositories::DashboardRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
///
/// Runs the six aggregate queries concurrently and merges them. The first
/// failing query fails the whole request.
pub async fn stats(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = state
        .cache
        .get_or_load(keys::stats(), || load_stats(&state))
        .await?;
    Ok(Json(DataResponse { data: stats }))
}

async fn load_stats(state: &AppState) -> Result<DashboardStats, AppError> {
    let pool = &state.pool;
    let (
        total_articles,
        total_authors,
        active_ticker_items,
        active_carousel_items,
        total_views,
        top,
    ) = tokio::try_join!(
        DashboardRepo::count_articles(pool),
        DashboardRepo::count_articles_with_author(pool),
        DashboardRepo::count_active(pool, ListKind::Ticker),
        DashboardRepo::count_active(pool, ListKind::Carousel),
        DashboardRepo::total_views(pool),
        DashboardRepo::top_viewed(pool, TOP_VIEWED_LIMIT),
    )?;

    let counts = DashboardCounts {
        total_articles,
        total_authors,
        active_ticker_items,
        active_carousel_items,
        total_views,
    };
    let top = top.into_iter().map(VisitedArticle::from).collect();
    Ok(summarize(counts, top))
}
