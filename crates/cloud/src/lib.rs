//! Object storage for uploaded article images.
//!
//! Handlers talk to an [`ObjectStore`] trait object; the concrete backend
//! (local filesystem or S3) is chosen at startup from [`StorageConfig`].

pub mod config;
pub mod error;
pub mod key;
pub mod local;
pub mod s3;
pub mod store;

use std::sync::Arc;

pub use config::StorageConfig;
pub use error::StorageError;
pub use key::object_key_for;
pub use local::LocalObjectStore;
pub use s3::S3ObjectStore;
pub use store::ObjectStore;

/// Build the backend described by `config`.
pub async fn create_store(config: StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config {
        StorageConfig::Local {
            root,
            public_base_url,
        } => {
            let store = LocalObjectStore::open(root, public_base_url).await?;
            Ok(Arc::new(store))
        }
        StorageConfig::S3 {
            bucket,
            region,
            endpoint,
            public_base_url,
        } => {
            let store = S3ObjectStore::connect(bucket, region, endpoint, public_base_url).await;
            Ok(Arc::new(store))
        }
    }
}
