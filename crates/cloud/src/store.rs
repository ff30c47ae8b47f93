//! Storage backend trait.

use async_trait::async_trait;

use crate::error::StorageError;

/// A flat namespace of public objects addressed by key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any existing object, and return
    /// the object's public URL.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    /// Remove the object stored under `key`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL of `key`. Does not check that the object exists.
    fn public_url(&self, key: &str) -> String;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Join a base URL and a key with exactly one slash.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}
