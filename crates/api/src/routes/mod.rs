pub mod admin;
pub mod ads;
pub mod articles;
pub mod auth;
pub mod carousel;
pub mod dashboard;
pub mod editor;
pub mod health;
pub mod ticker;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                 login (public)
/// /auth/logout                                logout (requires auth)
/// /auth/me                                    current user (requires auth)
///
/// /articles                                   list, create
/// /articles/submit                            create or update from a draft (POST)
/// /articles/images/upload                     upload an image (multipart POST)
/// /articles/{id}                              get, update, delete
/// /articles/{id}/images                       add (POST), remove (DELETE ?url=)
/// /articles/{id}/views                        count a view (POST, public)
///
/// /ticker                                     list active, replace all (GET, PUT)
/// /ticker/draft                               open, discard (GET, DELETE)
/// /ticker/draft/items                         append (POST)
/// /ticker/draft/items/{index}                 edit, remove (PATCH, DELETE)
/// /ticker/draft/items/{index}/move            move up/down (POST)
/// /ticker/draft/save                          save (POST)
///
/// /carousel/...                               same shape as /ticker
///
/// /dashboard/stats                            summary (GET)
///
/// /admin/users/search                         search by email (admin only)
/// /admin/users/{id}/toggle-admin              flip admin flag (admin only)
///
/// /ads                                        list, create (GET, POST)
/// /ads/{id}                                   get, update, delete
///
/// /editor/config                              rich text editor config (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/articles", articles::router())
        .nest("/ticker", ticker::router())
        .nest("/carousel", carousel::router())
        .nest("/dashboard", dashboard::router())
        .nest("/admin", admin::router())
        .nest("/ads", ads::router())
        .nest("/editor", editor::router())
}
