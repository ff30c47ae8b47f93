//! Storage backend selection from the environment.
//!
//! | Env var                      | Default                          |
//! |------------------------------|----------------------------------|
//! | `STORAGE_BACKEND`            | `local` (`local` or `s3`)        |
//! | `STORAGE_LOCAL_PATH`         | `./uploads`                      |
//! | `STORAGE_PUBLIC_BASE_URL`    | `http://localhost:3000/uploads`  |
//! | `STORAGE_S3_BUCKET`          | required for `s3`                |
//! | `STORAGE_S3_REGION`          | AWS default chain                |
//! | `STORAGE_S3_ENDPOINT`        | none (set for S3-compatible services) |
//! | `STORAGE_S3_PUBLIC_BASE_URL` | required for `s3`                |

use std::path::PathBuf;

use crate::error::StorageError;

pub const DEFAULT_LOCAL_PATH: &str = "./uploads";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000/uploads";

#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Local {
        root: PathBuf,
        public_base_url: String,
    },
    S3 {
        bucket: String,
        region: Option<String>,
        endpoint: Option<String>,
        public_base_url: String,
    },
}

impl StorageConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StorageError> {
        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "local".into());
        match backend.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local {
                root: PathBuf::from(
                    lookup("STORAGE_LOCAL_PATH").unwrap_or_else(|| DEFAULT_LOCAL_PATH.into()),
                ),
                public_base_url: lookup("STORAGE_PUBLIC_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.into()),
            }),
            "s3" => {
                let bucket = lookup("STORAGE_S3_BUCKET").ok_or_else(|| {
                    StorageError::Config("STORAGE_S3_BUCKET must be set for the s3 backend".into())
                })?;
                let public_base_url = lookup("STORAGE_S3_PUBLIC_BASE_URL").ok_or_else(|| {
                    StorageError::Config(
                        "STORAGE_S3_PUBLIC_BASE_URL must be set for the s3 backend".into(),
                    )
                })?;
                Ok(Self::S3 {
                    bucket,
                    region: lookup("STORAGE_S3_REGION"),
                    endpoint: lookup("STORAGE_S3_ENDPOINT"),
                    public_base_url,
                })
            }
            other => Err(StorageError::Config(format!(
                "Unknown STORAGE_BACKEND '{other}'. Expected 'local' or 's3'"
            ))),
        }
    }
}
