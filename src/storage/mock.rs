use super::{BlobStore, blob_key};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory [`BlobStore`] for tests.
#[derive(Clone)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    base_url: String,
    store_count: Arc<Mutex<usize>>,
    failing: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self {
            blobs: Arc::new(Mutex::new(HashMap::new())),
            base_url: "https://blobs.example.com".to_string(),
            store_count: Arc::new(Mutex::new(0)),
            failing: false,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Makes every `store` call fail, for exercising upload-failure paths.
    pub fn with_failure(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn store_count(&self) -> usize {
        *self.store_count.lock().unwrap()
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store(
        &self,
        data: &[u8],
        _content_type: &str,
        suggested_name: &str,
    ) -> Result<String> {
        *self.store_count.lock().unwrap() += 1;

        if self.failing {
            return Err(AppError::Upload("simulated upload failure".to_string()));
        }

        let key = blob_key(suggested_name);
        self.blobs
            .lock()
            .unwrap()
            .insert(key.clone(), data.to_vec());

        Ok(format!("{}/{}", self.base_url, key))
    }
}
