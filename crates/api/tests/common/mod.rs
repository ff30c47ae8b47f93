#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use newsdesk_api::auth::jwt::JwtConfig;
use newsdesk_api::auth::password::hash_password;
use newsdesk_api::config::ServerConfig;
use newsdesk_api::drafts::DraftStore;
use newsdesk_api::router::build_app_router;
use newsdesk_api::state::AppState;
use newsdesk_cloud::{LocalObjectStore, StorageConfig};
use newsdesk_core::cache::QueryCache;
use newsdesk_db::models::user::{CreateUser, User};
use newsdesk_db::repositories::{ReplaceMode, UserRepo};

/// Password given to every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads go to a fresh directory under the system temp dir.
pub fn test_config() -> ServerConfig {
    let upload_root: PathBuf =
        std::env::temp_dir().join(format!("newsdesk-test-{}", uuid::Uuid::new_v4()));
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        replace_mode: ReplaceMode::TwoPhase,
        cache_ttl_secs: 60,
        cache_max_entries: 1_000,
        editor_api_key: Some("test-editor-key".to_string()),
        storage: StorageConfig::Local {
            root: upload_root,
            public_base_url: "http://localhost:3000/uploads".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack that production uses.
pub async fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, |_| {}).await
}

/// Like [`build_test_app`], with a hook to adjust the configuration first.
pub async fn build_test_app_with(pool: PgPool, adjust: impl FnOnce(&mut ServerConfig)) -> Router {
    let mut config = test_config();
    adjust(&mut config);

    let StorageConfig::Local {
        root,
        public_base_url,
    } = config.storage.clone()
    else {
        panic!("tests use local storage");
    };
    let store = LocalObjectStore::open(root, public_base_url)
        .await
        .expect("temp upload dir should be creatable");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        cache: Arc::new(QueryCache::new(
            Duration::from_secs(config.cache_ttl_secs),
            config.cache_max_entries,
        )),
        drafts: Arc::new(DraftStore::default()),
        store: Arc::new(store),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

/// Insert a user whose password is [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, is_admin: bool) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash,
            is_admin,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(app: &Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("access_token must be a string")
        .to_string()
}

/// Create a user and log them in. Returns the user and a bearer token.
pub async fn signed_in(pool: &PgPool, app: &Router, email: &str, is_admin: bool) -> (User, String) {
    let user = create_user(pool, email, is_admin).await;
    let token = login(app, email).await;
    (user, token)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Send a request with an optional bearer token and JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).expect("serializable body"))
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).expect("valid request"))
        .await
        .expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a multipart form with one file part and optional text parts.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    file_name: &str,
    file_bytes: &[u8],
    text_fields: &[(&str, &str)],
) -> Response {
    let boundary = "newsdesk-test-boundary";
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in text_fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("valid request");
    app.oneshot(request).await.expect("router is infallible")
}
