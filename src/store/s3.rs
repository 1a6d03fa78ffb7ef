use std::path::Path;

use aws_config::BehaviorVersion;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use super::{ObjectStore, StoreError};

pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Client built from the default AWS credential/region chain.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config), bucket)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl ObjectStore for S3Store {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let result = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) => {
                let service = e.into_service_error();
                if service.is_not_found() {
                    debug!("s3://{}/{} not found", self.bucket, key);
                    Ok(false)
                } else {
                    Err(StoreError::Lookup {
                        key: key.to_string(),
                        message: DisplayErrorContext(&service).to_string(),
                    })
                }
            }
        }
    }

    async fn download(&self, key: &str, dest: &Path) -> Result<(), StoreError> {
        let download_err = |message: String| StoreError::Download {
            key: key.to_string(),
            message,
        };

        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| download_err(DisplayErrorContext(&e).to_string()))?;
        let bytes = object
            .body
            .collect()
            .await
            .map_err(|e| download_err(e.to_string()))?
            .into_bytes();

        tokio::fs::write(dest, &bytes).await?;
        debug!("Downloaded {} bytes from s3://{}/{}", bytes.len(), self.bucket, key);
        Ok(())
    }

    async fn upload(&self, src: &Path, key: &str) -> Result<(), StoreError> {
        let upload_err = |message: String| StoreError::Upload {
            key: key.to_string(),
            message,
        };

        let body = ByteStream::from_path(src)
            .await
            .map_err(|e| upload_err(e.to_string()))?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("text/csv")
            .body(body)
            .send()
            .await
            .map_err(|e| upload_err(DisplayErrorContext(&e).to_string()))?;
        debug!("Uploaded {} to s3://{}/{}", src.display(), self.bucket, key);
        Ok(())
    }
}
