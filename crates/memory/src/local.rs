use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use attachstore_core::{Fingerprint, LocalStore, StoreError, StoredReference};
use bytes::Bytes;
use dashmap::DashMap;

/// In-memory [`LocalStore`] using the same `<shard>/<fingerprint>` names as
/// the filesystem store.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    files: DashMap<String, Bytes>,
    writes: AtomicUsize,
    reads: AtomicUsize,
    fail_reads: AtomicBool,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with [`StoreError::Local`].
    pub fn set_failing_reads(&self, failing: bool) {
        self.fail_reads.store(failing, Ordering::SeqCst);
    }

    /// Place content under an arbitrary name.
    pub fn insert(&self, name: impl Into<String>, data: Bytes) {
        self.files.insert(name.into(), data);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocalStore for MemoryLocalStore {
    async fn write(
        &self,
        data: Bytes,
        checksum: &Fingerprint,
    ) -> Result<StoredReference, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let hex = checksum.as_str();
        let name = format!("{}/{hex}", hex.get(..2).unwrap_or(hex));
        self.files.entry(name.clone()).or_insert(data);
        Ok(StoredReference::new(name))
    }

    async fn read(&self, name: &str) -> Result<Option<Bytes>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Local(format!("{name}: simulated I/O error")));
        }
        Ok(self.files.get(name).map(|d| d.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn conformance() {
        let store = MemoryLocalStore::new();
        attachstore_core::testing::run_local_store_conformance_tests(&store)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn names_match_filestore_layout() {
        let store = MemoryLocalStore::new();
        let name = store
            .write(Bytes::from_static(b"hello world"), &Fingerprint::of(b"hello world"))
            .await
            .unwrap();
        assert_eq!(name.as_str(), "2a/2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn failing_reads() {
        let store = MemoryLocalStore::new();
        store.insert("ab/abc", Bytes::from_static(b"x"));
        store.set_failing_reads(true);
        assert!(matches!(
            store.read("ab/abc").await,
            Err(StoreError::Local(_))
        ));
        assert_eq!(store.read_count(), 1);
    }
}
