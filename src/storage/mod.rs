//! Blob storage for uploaded product images.
//!
//! Stored objects are keyed by a millisecond timestamp plus the original
//! file name and exposed through a public URL.

mod mock;
mod s3;

pub use mock::MemoryBlobStore;
pub use s3::S3BlobStore;

use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `data` under a generated name derived from `suggested_name`
    /// and returns a publicly resolvable URL for the object.
    async fn store(&self, data: &[u8], content_type: &str, suggested_name: &str)
        -> Result<String>;
}

/// Object key for an upload: millisecond timestamp plus the original file
/// name, so same-named uploads do not overwrite each other.
pub(crate) fn blob_key(suggested_name: &str) -> String {
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), suggested_name)
}
