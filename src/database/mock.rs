use super::ProductStore;
use crate::error::{AppError, Result};
use crate::models::Product;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory [`ProductStore`] for tests.
#[derive(Clone)]
pub struct MemoryProductStore {
    products: Arc<Mutex<Vec<Product>>>,
    insert_count: Arc<Mutex<usize>>,
    failing: bool,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self {
            products: Arc::new(Mutex::new(Vec::new())),
            insert_count: Arc::new(Mutex::new(0)),
            failing: false,
        }
    }

    /// Makes every operation fail, for exercising store-failure paths.
    pub fn with_failure(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn insert_count(&self) -> usize {
        *self.insert_count.lock().unwrap()
    }

    pub fn stored(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: Product) -> Result<Product> {
        *self.insert_count.lock().unwrap() += 1;

        if self.failing {
            return Err(AppError::Store("simulated store failure".to_string()));
        }

        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn list_all(&self) -> Result<Vec<Product>> {
        if self.failing {
            return Err(AppError::Store("simulated store failure".to_string()));
        }

        Ok(self.products.lock().unwrap().clone())
    }

    async fn ping(&self) -> Result<()> {
        if self.failing {
            return Err(AppError::Store("simulated store failure".to_string()));
        }

        Ok(())
    }
}
