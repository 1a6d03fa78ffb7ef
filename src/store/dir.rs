use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ObjectStore, StoreError};

/// A local directory used as a bucket: each key is a file directly under `root`.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStore for DirStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        match tokio::fs::metadata(self.object_path(key)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Lookup {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn download(&self, key: &str, dest: &Path) -> Result<(), StoreError> {
        tokio::fs::copy(self.object_path(key), dest)
            .await
            .map_err(|e| StoreError::Download {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn upload(&self, src: &Path, key: &str) -> Result<(), StoreError> {
        let upload_err = |e: std::io::Error| StoreError::Upload {
            key: key.to_string(),
            message: e.to_string(),
        };
        tokio::fs::create_dir_all(&self.root).await.map_err(upload_err)?;
        tokio::fs::copy(src, self.object_path(key))
            .await
            .map_err(upload_err)?;
        Ok(())
    }
}

// ── Tests ──
