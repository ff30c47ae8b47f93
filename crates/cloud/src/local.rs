//! Local filesystem backend.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::error::StorageError;
use crate::key::check_key;
use crate::store::{join_url, ObjectStore};

/// Stores objects as files in a single directory. The directory is expected
/// to be served at `public_base_url` (the API mounts it under `/uploads`).
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    /// Open the store, creating `root` if it does not exist yet.
    pub async fn open(
        root: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        if !fs::metadata(&root).await?.is_dir() {
            return Err(StorageError::Config(format!(
                "Storage path is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self {
            root,
            public_base_url: public_base_url.into(),
        })
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        check_key(key)?;
        fs::write(self.root.join(key), &bytes).await?;
        tracing::debug!(key, size = bytes.len(), "Stored object on local disk");
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        match fs::remove_file(self.root.join(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
