//! Conformance suites for storage backends.
//!
//! Call these from a backend's test module with a fresh, empty instance.

use bytes::Bytes;

use crate::error::StoreError;
use crate::fingerprint::Fingerprint;
use crate::store::{LocalStore, ObjectStore};

const TEST_BUCKET: &str = "conformance-bucket";

/// Run the full local store conformance test suite.
///
/// # Errors
///
/// Returns an error if any backend call fails unexpectedly.
pub async fn run_local_store_conformance_tests(store: &dyn LocalStore) -> Result<(), StoreError> {
    test_local_read_missing(store).await?;
    test_local_write_then_read(store).await?;
    test_local_same_content_same_name(store).await?;
    test_local_distinct_content_distinct_name(store).await?;
    test_local_empty_content(store).await?;
    Ok(())
}

async fn test_local_read_missing(store: &dyn LocalStore) -> Result<(), StoreError> {
    let missing = Fingerprint::of(b"never written");
    let read = store.read(missing.as_str()).await?;
    assert!(read.is_none(), "read of an unknown name should return None");
    Ok(())
}

async fn test_local_write_then_read(store: &dyn LocalStore) -> Result<(), StoreError> {
    let data = Bytes::from_static(b"%PDF-1.7 quarterly report");
    let checksum = Fingerprint::of(&data);
    let name = store.write(data.clone(), &checksum).await?;
    let read = store.read(name.as_str()).await?;
    assert_eq!(read, Some(data), "read should return the written bytes");
    Ok(())
}

async fn test_local_same_content_same_name(store: &dyn LocalStore) -> Result<(), StoreError> {
    let data = Bytes::from_static(b"duplicate body");
    let checksum = Fingerprint::of(&data);
    let first = store.write(data.clone(), &checksum).await?;
    let second = store.write(data, &checksum).await?;
    assert_eq!(first, second, "identical content should share a name");
    Ok(())
}

async fn test_local_distinct_content_distinct_name(
    store: &dyn LocalStore,
) -> Result<(), StoreError> {
    let a = Bytes::from_static(b"first body");
    let b = Bytes::from_static(b"second body");
    let name_a = store.write(a.clone(), &Fingerprint::of(&a)).await?;
    let name_b = store.write(b.clone(), &Fingerprint::of(&b)).await?;
    assert_ne!(name_a, name_b, "distinct content should get distinct names");
    assert_eq!(store.read(name_a.as_str()).await?, Some(a));
    assert_eq!(store.read(name_b.as_str()).await?, Some(b));
    Ok(())
}

async fn test_local_empty_content(store: &dyn LocalStore) -> Result<(), StoreError> {
    let data = Bytes::new();
    let name = store.write(data.clone(), &Fingerprint::of(&data)).await?;
    assert_eq!(store.read(name.as_str()).await?, Some(data));
    Ok(())
}

/// Run the full object store conformance test suite.
///
/// # Errors
///
/// Returns an error if any backend call fails unexpectedly.
pub async fn run_object_store_conformance_tests(
    store: &dyn ObjectStore,
) -> Result<(), StoreError> {
    test_object_missing(store).await?;
    test_object_put_then_get(store).await?;
    test_object_overwrite(store).await?;
    test_object_buckets_are_isolated(store).await?;
    Ok(())
}

async fn test_object_missing(store: &dyn ObjectStore) -> Result<(), StoreError> {
    let exists = store.object_exists(TEST_BUCKET, "missing.png").await?;
    assert!(!exists, "object_exists on a missing key should return false");
    Ok(())
}

async fn test_object_put_then_get(store: &dyn ObjectStore) -> Result<(), StoreError> {
    let body = Bytes::from_static(b"\x89PNG\r\n\x1a\n");
    store
        .put_object(TEST_BUCKET, "logo.png", body.clone(), "image/png")
        .await?;
    assert!(store.object_exists(TEST_BUCKET, "logo.png").await?);
    let fetched = store.get_object(TEST_BUCKET, "logo.png").await?;
    assert_eq!(fetched, body, "get should return the uploaded body");
    Ok(())
}

async fn test_object_overwrite(store: &dyn ObjectStore) -> Result<(), StoreError> {
    store
        .put_object(TEST_BUCKET, "same.gif", Bytes::from_static(b"GIF89a-1"), "image/gif")
        .await?;
    store
        .put_object(TEST_BUCKET, "same.gif", Bytes::from_static(b"GIF89a-2"), "image/gif")
        .await?;
    let fetched = store.get_object(TEST_BUCKET, "same.gif").await?;
    assert_eq!(fetched.as_ref(), b"GIF89a-2", "put should overwrite");
    Ok(())
}

async fn test_object_buckets_are_isolated(store: &dyn ObjectStore) -> Result<(), StoreError> {
    store
        .put_object(TEST_BUCKET, "only-here.svg", Bytes::from_static(b"<svg/>"), "image/svg+xml")
        .await?;
    let elsewhere = store
        .object_exists("another-bucket", "only-here.svg")
        .await?;
    assert!(!elsewhere, "objects should not leak across buckets");
    Ok(())
}
