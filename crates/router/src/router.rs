use std::sync::Arc;

use attachstore_core::{
    AttachmentValues, ConnectionHandle, ConnectionResolver, Fingerprint, LocalStore, StorageMode,
    StoreError, StoredReference, index_content, media,
};
use bytes::Bytes;
use tracing::{debug, error, info, instrument, warn};

use crate::config::RemoteWriteFailure;

/// Backing store selected for a write.
enum Backend {
    Local,
    Remote(ConnectionHandle),
}

/// Routes attachment content between the remote bucket and local storage.
///
/// Every operation resolves a fresh connection; the router itself holds no
/// per-operation state and can be shared across tasks.
pub struct ContentRouter {
    resolver: Arc<dyn ConnectionResolver>,
    local: Arc<dyn LocalStore>,
    on_remote_write_failure: RemoteWriteFailure,
    storage_mode: StorageMode,
}

impl std::fmt::Debug for ContentRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRouter")
            .field("resolver", &"<ConnectionResolver>")
            .field("local", &"<LocalStore>")
            .field("on_remote_write_failure", &self.on_remote_write_failure)
            .field("storage_mode", &self.storage_mode)
            .finish()
    }
}

impl ContentRouter {
    pub fn new(resolver: Arc<dyn ConnectionResolver>, local: Arc<dyn LocalStore>) -> Self {
        Self {
            resolver,
            local,
            on_remote_write_failure: RemoteWriteFailure::default(),
            storage_mode: StorageMode::default(),
        }
    }

    /// Set the behaviour when a remote upload fails.
    #[must_use]
    pub fn with_remote_write_failure(mut self, policy: RemoteWriteFailure) -> Self {
        self.on_remote_write_failure = policy;
        self
    }

    /// Set the storage mode used by [`Self::prepare_values`].
    #[must_use]
    pub fn with_storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    /// Store `data` and return the reference it can be loaded back with.
    ///
    /// Image-like content goes to the bucket as `[prefix]<sha1><ext>` when a
    /// connection resolves. Everything else is handed to local storage,
    /// whose name is returned unchanged.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn store(
        &self,
        data: Bytes,
        media_type: &str,
    ) -> Result<StoredReference, StoreError> {
        let fingerprint = Fingerprint::of(&data);
        self.store_fingerprinted(data, &fingerprint, media_type)
            .await
    }

    async fn store_fingerprinted(
        &self,
        data: Bytes,
        fingerprint: &Fingerprint,
        media_type: &str,
    ) -> Result<StoredReference, StoreError> {
        let extension = media::guess_extension(media_type);

        let handle = match self.route_write(extension).await {
            Backend::Remote(handle) => handle,
            Backend::Local => return self.local.write(data, fingerprint).await,
        };

        let key = StoredReference::object_key(handle.prefix(), fingerprint, extension);
        let put = handle
            .client()
            .put_object(handle.bucket(), key.as_str(), data.clone(), media_type)
            .await;

        match (put, self.on_remote_write_failure) {
            (Ok(()), _) => {
                info!(bucket = %handle.bucket(), key = %key, "attachment stored remotely");
                Ok(key)
            }
            (Err(e), RemoteWriteFailure::Fail) => {
                error!(bucket = %handle.bucket(), key = %key, error = %e, "remote upload failed");
                Err(e)
            }
            (Err(e), RemoteWriteFailure::FallbackToLocal) => {
                warn!(bucket = %handle.bucket(), key = %key, error = %e, "remote upload failed, storing locally");
                self.local.write(data, fingerprint).await
            }
        }
    }

    async fn route_write(&self, extension: &str) -> Backend {
        if !media::is_remote_eligible(extension) {
            debug!(extension = %extension, "content not eligible for remote storage");
            return Backend::Local;
        }
        match self.resolver.resolve().await {
            Some(handle) => Backend::Remote(handle),
            None => {
                debug!("remote storage unavailable, storing locally");
                Backend::Local
            }
        }
    }

    /// Load content by reference.
    ///
    /// Missing content and storage failures both come back as `None`, so a
    /// record whose backing object vanished still renders. Use
    /// [`Self::try_load`] to tell them apart.
    pub async fn load(&self, reference: &str) -> Option<Bytes> {
        match self.try_load(reference).await {
            Ok(data) => data,
            Err(e) => {
                warn!(reference = %reference, error = %e, "attachment content unreadable");
                None
            }
        }
    }

    /// Load content by reference, surfacing local storage failures.
    ///
    /// Image-like references are looked up in the bucket first. A miss or a
    /// remote failure falls through to local storage.
    #[instrument(skip(self))]
    pub async fn try_load(&self, reference: &str) -> Result<Option<Bytes>, StoreError> {
        if media::is_remote_eligible(media::extension_of(reference)) {
            if let Some(handle) = self.resolver.resolve().await {
                match read_remote(&handle, reference).await {
                    Ok(Some(data)) => return Ok(Some(data)),
                    Ok(None) => debug!("not in bucket, reading locally"),
                    Err(e) => warn!(error = %e, "remote read failed, reading locally"),
                }
            }
        }
        self.local.read(reference).await
    }

    /// Derive attachment record values for `data`.
    ///
    /// In [`StorageMode::File`] non-empty content is stored via
    /// [`Self::store`] and the inline copy is dropped. In [`StorageMode::Db`],
    /// or for empty content, the data stays inline.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn prepare_values(
        &self,
        data: Bytes,
        media_type: &str,
    ) -> Result<AttachmentValues, StoreError> {
        let checksum = Fingerprint::of(&data);
        let file_size = data.len() as u64;
        let index_content = index_content(&data, media_type);

        if data.is_empty() || self.storage_mode == StorageMode::Db {
            return Ok(AttachmentValues {
                file_size,
                checksum,
                index_content,
                store_fname: None,
                db_datas: Some(data),
            });
        }

        let store_fname = self
            .store_fingerprinted(data, &checksum, media_type)
            .await?;
        Ok(AttachmentValues {
            file_size,
            checksum,
            index_content,
            store_fname: Some(store_fname),
            db_datas: None,
        })
    }
}

/// Fetch `key` from the bucket if it exists there.
async fn read_remote(handle: &ConnectionHandle, key: &str) -> Result<Option<Bytes>, StoreError> {
    if !handle.client().object_exists(handle.bucket(), key).await? {
        return Ok(None);
    }
    let data = handle.client().get_object(handle.bucket(), key).await?;
    Ok(Some(data))
}
