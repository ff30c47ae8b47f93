//! HTTP-level integration tests for the admin user panel.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth};
use newsdesk_db::models::user::CreateUser;
use newsdesk_db::repositories::UserRepo;
use sqlx::PgPool;

/// Queries of two characters or fewer return nothing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_short_query_returns_empty(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin, token) = common::signed_in(&pool, &app, "root@news.example", true).await;

    for uri in [
        "/api/v1/admin/users/search",
        "/api/v1/admin/users/search?q=ro",
    ] {
        let response = get_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }
}

/// Search is a case-insensitive substring match capped at ten users.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_is_case_insensitive_and_limited(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin, token) = common::signed_in(&pool, &app, "root@news.example", true).await;
    // These users never log in, so a placeholder hash keeps the test fast.
    let emails = (0..12)
        .map(|i| format!("writer{i:02}@Desk.example"))
        .chain(["other@elsewhere.example".to_string()]);
    for email in emails {
        let input = CreateUser {
            email,
            password_hash: "not-a-real-hash".to_string(),
            is_admin: false,
        };
        UserRepo::create(&pool, &input).await.unwrap();
    }

    let response = get_auth(app.clone(), "/api/v1/admin/users/search?q=DESK", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let users = body_json(response).await["data"].clone();
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 10);
    assert_eq!(users[0]["email"], "writer00@Desk.example");
    assert!(users[0].get("password_hash").is_none());

    let response = get_auth(app, "/api/v1/admin/users/search?q=elsewhere", &token).await;
    let users = body_json(response).await["data"].clone();
    assert_eq!(users.as_array().unwrap().len(), 1);
}

/// Toggling flips the flag, persists it, and refreshes cached searches.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_admin_twice(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin, token) = common::signed_in(&pool, &app, "root@news.example", true).await;
    let target = common::create_user(&pool, "reporter@news.example", false).await;

    // Cache a search result that includes the target.
    let response = get_auth(app.clone(), "/api/v1/admin/users/search?q=reporter", &token).await;
    assert_eq!(body_json(response).await["data"][0]["is_admin"], false);

    let uri = format!("/api/v1/admin/users/{}/toggle-admin", target.id);
    let response = post_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_admin"], true);
    let stored = UserRepo::find_by_id(&pool, target.id).await.unwrap().unwrap();
    assert!(stored.is_admin);

    let response = get_auth(app.clone(), "/api/v1/admin/users/search?q=reporter", &token).await;
    assert_eq!(body_json(response).await["data"][0]["is_admin"], true);

    let response = post_auth(app, &uri, &token).await;
    assert_eq!(body_json(response).await["data"]["is_admin"], false);
    let stored = UserRepo::find_by_id(&pool, target.id).await.unwrap().unwrap();
    assert!(!stored.is_admin);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_unknown_user_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin, token) = common::signed_in(&pool, &app, "root@news.example", true).await;

    let uri = format!("/api/v1/admin/users/{}/toggle-admin", uuid::Uuid::new_v4());
    let response = post_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Non-admins get 403 on every admin endpoint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_admin_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (user, token) = common::signed_in(&pool, &app, "desk@news.example", false).await;

    let response = get_auth(app.clone(), "/api/v1/admin/users/search?q=desk", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let uri = format!("/api/v1/admin/users/{}/toggle-admin", user.id);
    let response = post_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(!stored.is_admin);
}
