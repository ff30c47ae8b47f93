use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use newsdesk_core::cache::QueryCache;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk_api::auth::bootstrap::{ensure_admin, BootstrapAdmin};
use newsdesk_api::background;
use newsdesk_api::config::ServerConfig;
use newsdesk_api::drafts::DraftStore;
use newsdesk_api::router::build_app_router;
use newsdesk_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        replace_mode = %config.replace_mode,
        "Loaded server configuration"
    );
    if config.editor_api_key.is_none() {
        tracing::warn!("EDITOR_API_KEY is not set; the rich text editor will be unavailable");
    }

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = newsdesk_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    newsdesk_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    newsdesk_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- First admin ---
    if let Some(admin) = BootstrapAdmin::from_env() {
        match ensure_admin(&pool, &admin).await {
            Ok(Some(user)) => tracing::info!(user_id = %user.id, "Bootstrap admin created"),
            Ok(None) => tracing::debug!("Bootstrap admin already exists"),
            Err(e) => panic!("Failed to create bootstrap admin: {e}"),
        }
    }

    // --- Object storage ---
    let store = newsdesk_cloud::create_store(config.storage.clone())
        .await
        .expect("Failed to initialize object storage");
    tracing::info!(backend = store.backend_name(), "Object storage ready");

    // --- Background jobs ---
    let cancel = CancellationToken::new();
    let cleanup_handle = tokio::spawn(background::session_cleanup::run(
        pool.clone(),
        cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        cache: Arc::new(QueryCache::new(
            config.cache_ttl(),
            config.cache_max_entries,
        )),
        drafts: Arc::new(DraftStore::default()),
        store,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), cleanup_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
