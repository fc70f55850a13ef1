use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use attachstore_core::{Fingerprint, LocalStore, StoreError, StoredReference};
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Distinguishes temp files of concurrent writers within this process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Filesystem-backed [`LocalStore`].
///
/// Names are `<first two hex chars>/<fingerprint>`. Writing content that is
/// already present is a no-op.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a filestore rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name under which content with `checksum` is stored.
    pub fn name_for(checksum: &Fingerprint) -> String {
        let hex = checksum.as_str();
        let shard = hex.get(..2).unwrap_or(hex);
        format!("{shard}/{hex}")
    }

    /// Resolve `name` inside the root, rejecting anything that could escape it.
    fn full_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(name);
        let contained = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !contained {
            return Err(StoreError::InvalidReference(name.to_owned()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl LocalStore for FileStore {
    async fn write(
        &self,
        data: Bytes,
        checksum: &Fingerprint,
    ) -> Result<StoredReference, StoreError> {
        let name = Self::name_for(checksum);
        let full_path = self.full_path(&name)?;

        if fs::try_exists(&full_path).await? {
            debug!(name = %name, "filestore: content already present");
            return Ok(StoredReference::new(name));
        }

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                warn!(parent = %parent.display(), error = %e, "filestore: create_dir_all failed");
                e
            })?;
        }

        // Write to a sibling temp file unique to this writer, then rename so
        // readers never see a partially written file.
        let temp_path = temp_path_for(&full_path);
        if let Err(e) = write_synced(&temp_path, &data).await {
            warn!(temp_path = %temp_path.display(), error = %e, "filestore: temp write failed");
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &full_path).await {
            let _ = fs::remove_file(&temp_path).await;
            // A concurrent writer of the same checksum may have won the race.
            if fs::try_exists(&full_path).await.unwrap_or(false) {
                debug!(name = %name, "filestore: content written concurrently");
                return Ok(StoredReference::new(name));
            }
            warn!(from = %temp_path.display(), to = %full_path.display(), error = %e, "filestore: rename failed");
            return Err(e.into());
        }

        debug!(name = %name, size = data.len(), "filestore: content written");
        Ok(StoredReference::new(name))
    }

    async fn read(&self, name: &str) -> Result<Option<Bytes>, StoreError> {
        let full_path = self.full_path(name)?;
        match fs::read(&full_path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(name = %name, "filestore: no content under name");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn temp_path_for(full_path: &Path) -> PathBuf {
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = full_path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.{seq}.tmp", std::process::id()));
    full_path.with_file_name(name)
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}
