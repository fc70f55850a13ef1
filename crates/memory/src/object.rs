use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use attachstore_core::{ObjectStore, StoreError};
use bytes::Bytes;
use dashmap::DashMap;

/// An object held by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
}

/// In-memory [`ObjectStore`] keyed by `(bucket, key)`.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: DashMap<(String, String), StoredObject>,
    puts: AtomicUsize,
    gets: AtomicUsize,
    exists_checks: AtomicUsize,
    fail_requests: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent request fail with [`StoreError::Remote`].
    pub fn set_failing(&self, failing: bool) {
        self.fail_requests.store(failing, Ordering::SeqCst);
    }

    /// Look up an object without counting it as a request.
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .map(|o| o.value().clone())
    }

    /// Number of objects across all buckets.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn exists_count(&self) -> usize {
        self.exists_checks.load(Ordering::SeqCst)
    }

    fn check_failing(&self, op: &str) -> Result<(), StoreError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(StoreError::Remote(format!("{op}: simulated connection reset")));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.check_failing("put_object")?;
        self.objects.insert(
            (bucket.to_owned(), key.to_owned()),
            StoredObject {
                body,
                content_type: content_type.to_owned(),
            },
        );
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check_failing("get_object")?;
        self.object(bucket, key)
            .map(|o| o.body)
            .ok_or_else(|| StoreError::Remote(format!("NoSuchKey: {bucket}/{key}")))
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        self.exists_checks.fetch_add(1, Ordering::SeqCst);
        self.check_failing("object_exists")?;
        Ok(self
            .objects
            .contains_key(&(bucket.to_owned(), key.to_owned())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn conformance() {
        let store = MemoryObjectStore::new();
        attachstore_core::testing::run_object_store_conformance_tests(&store)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn records_content_type() {
        let store = MemoryObjectStore::new();
        store
            .put_object("b", "a.svg", Bytes::from_static(b"<svg/>"), "image/svg+xml")
            .await
            .unwrap();
        let object = store.object("b", "a.svg").unwrap();
        assert_eq!(object.content_type, "image/svg+xml");
        assert_eq!(store.put_count(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn get_missing_is_an_error() {
        let store = MemoryObjectStore::new();
        let err = store.get_object("b", "nope.png").await.unwrap_err();
        assert!(matches!(err, StoreError::Remote(_)));
    }

    #[tokio::test]
    async fn failing_mode_rejects_requests() {
        let store = MemoryObjectStore::new();
        store.set_failing(true);
        let err = store
            .put_object("b", "k.png", Bytes::new(), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Remote(msg) if msg.contains("put_object")));
        assert!(store.is_empty());

        store.set_failing(false);
        assert!(!store.object_exists("b", "k.png").await.unwrap());
    }
}
