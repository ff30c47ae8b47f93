//! Local filesystem backend against a temporary directory.

use assert_matches::assert_matches;
use newsdesk_cloud::{object_key_for, LocalObjectStore, ObjectStore, StorageError};

#[tokio::test]
async fn put_writes_file_and_returns_public_url() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalObjectStore::open(dir.path(), "http://localhost:3000/uploads/")
        .await
        .unwrap();

    let key = object_key_for("front page.png");
    let url = store
        .put(&key, b"png-bytes".to_vec(), Some("image/png"))
        .await
        .unwrap();

    assert_eq!(url, format!("http://localhost:3000/uploads/{key}"));
    let written = tokio::fs::read(dir.path().join(&key)).await.unwrap();
    assert_eq!(written, b"png-bytes");
}

#[tokio::test]
async fn open_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    LocalObjectStore::open(&nested, "http://x").await.unwrap();
    assert!(nested.is_dir());
}

#[tokio::test]
async fn delete_removes_and_reports_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalObjectStore::open(dir.path(), "http://x").await.unwrap();

    store.put("1-a.txt", b"a".to_vec(), None).await.unwrap();
    store.delete("1-a.txt").await.unwrap();
    assert!(!dir.path().join("1-a.txt").exists());

    assert_matches!(store.delete("1-a.txt").await, Err(StorageError::NotFound(_)));
}

#[tokio::test]
async fn traversal_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalObjectStore::open(dir.path(), "http://x").await.unwrap();
    assert_matches!(
        store.put("../escape.txt", b"x".to_vec(), None).await,
        Err(StorageError::InvalidKey(_))
    );
}
