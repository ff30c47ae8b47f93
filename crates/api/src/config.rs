use std::time::Duration;

use newsdesk_cloud::StorageConfig;
use newsdesk_core::cache::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_SECS};
use newsdesk_db::repositories::ReplaceMode;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// How ticker and carousel saves combine their two statements.
    pub replace_mode: ReplaceMode,
    /// Lifetime of cached read results in seconds. `0` disables caching.
    pub cache_ttl_secs: u64,
    /// Upper bound on cached read results (default: `1000`).
    pub cache_max_entries: u64,
    /// Key handed to the rich text editor widget. `None` when unset.
    pub editor_api_key: Option<String>,
    /// Object storage backend for uploaded images.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `REPLACE_MODE`         | `two_phase` (or `atomic`)  |
    /// | `CACHE_TTL_SECS`       | `60`                       |
    /// | `CACHE_MAX_ENTRIES`    | `1000`                     |
    /// | `EDITOR_API_KEY`       | unset                      |
    ///
    /// JWT and storage variables are documented on [`JwtConfig::from_env`]
    /// and [`StorageConfig`].
    ///
    /// # Panics
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let replace_mode: ReplaceMode = std::env::var("REPLACE_MODE")
            .unwrap_or_else(|_| ReplaceMode::default().to_string())
            .parse()
            .unwrap_or_else(|e| panic!("REPLACE_MODE: {e}"));

        let cache_ttl_secs: u64 = std::env::var("CACHE_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_CACHE_TTL_SECS.to_string())
            .parse()
            .expect("CACHE_TTL_SECS must be a valid u64");

        let cache_max_entries: u64 = std::env::var("CACHE_MAX_ENTRIES")
            .unwrap_or_else(|_| DEFAULT_CACHE_MAX_ENTRIES.to_string())
            .parse()
            .expect("CACHE_MAX_ENTRIES must be a valid u64");

        let editor_api_key = std::env::var("EDITOR_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let storage = StorageConfig::from_env().unwrap_or_else(|e| panic!("{e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            replace_mode,
            cache_ttl_secs,
            cache_max_entries,
            editor_api_key,
            storage,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
