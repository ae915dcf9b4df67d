use aws_sdk_s3::{Client as S3Client, primitives::ByteStream};

use super::{BlobStore, blob_key};
use crate::error::{AppError, Result};
use async_trait::async_trait;

pub struct S3BlobStore {
    client: S3Client,
    bucket: String,
    public_url: String,
}

impl S3BlobStore {
    /// Builds the store and makes a best-effort check that the bucket
    /// exists, creating it when missing. A failed check is logged and
    /// does not block startup.
    pub async fn new(client: S3Client, bucket: String, public_url: String) -> Self {
        match client.head_bucket().bucket(&bucket).send().await {
            Ok(_) => {}
            Err(_) => match client.create_bucket().bucket(&bucket).send().await {
                Ok(_) => tracing::info!("Created bucket {}", bucket),
                Err(e) => tracing::warn!("Could not ensure bucket {} exists: {}", bucket, e),
            },
        }

        Self {
            client,
            bucket,
            public_url,
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn store(
        &self,
        data: &[u8],
        content_type: &str,
        suggested_name: &str,
    ) -> Result<String> {
        let key = blob_key(suggested_name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        Ok(format!("{}/{}", self.public_url, key))
    }
}
