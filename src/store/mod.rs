pub mod dir;
pub mod s3;

use std::path::Path;

use thiserror::Error;

pub use dir::DirStore;
pub use s3::S3Store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to look up object {key}: {message}")]
    Lookup { key: String, message: String },
    #[error("failed to download object {key}: {message}")]
    Download { key: String, message: String },
    #[error("failed to upload object {key}: {message}")]
    Upload { key: String, message: String },
    #[error("scratch file I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv encoding: {0}")]
    Csv(#[from] csv::Error),
}

/// Minimal object store surface: whole-object reads and writes by key.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    /// `Ok(false)` only when the object is missing; any other failure is an error.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;
    async fn download(&self, key: &str, dest: &Path) -> Result<(), StoreError>;
    /// Replaces the object's content with the file at `src`.
    async fn upload(&self, src: &Path, key: &str) -> Result<(), StoreError>;
}

/// Store chosen at startup from configuration.
pub enum Backend {
    S3(S3Store),
    Dir(DirStore),
}

impl Backend {
    pub fn describe(&self) -> String {
        match self {
            Backend::S3(s) => format!("s3://{}", s.bucket()),
            Backend::Dir(d) => format!("dir:{}", d.root().display()),
        }
    }
}

impl ObjectStore for Backend {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        match self {
            Backend::S3(s) => s.exists(key).await,
            Backend::Dir(d) => d.exists(key).await,
        }
    }

    async fn download(&self, key: &str, dest: &Path) -> Result<(), StoreError> {
        match self {
            Backend::S3(s) => s.download(key, dest).await,
            Backend::Dir(d) => d.download(key, dest).await,
        }
    }

    async fn upload(&self, src: &Path, key: &str) -> Result<(), StoreError> {
        match self {
            Backend::S3(s) => s.upload(src, key).await,
            Backend::Dir(d) => d.upload(src, key).await,
        }
    }
}
