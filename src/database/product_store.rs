use futures::TryStreamExt;
use mongodb::{Collection, bson::doc};

use crate::error::Result;
use crate::models::Product;
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists the document as-is; the caller has already assigned `id`.
    async fn insert(&self, product: Product) -> Result<Product>;

    /// Returns every document in the collection in store order, unbounded.
    async fn list_all(&self) -> Result<Vec<Product>>;

    /// Cheap liveness probe for the readiness endpoint.
    async fn ping(&self) -> Result<()>;
}

pub struct MongoProductStore {
    collection: Collection<Product>,
}

impl MongoProductStore {
    pub fn new(collection: Collection<Product>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn insert(&self, product: Product) -> Result<Product> {
        self.collection.insert_one(&product).await?;
        Ok(product)
    }

    async fn list_all(&self) -> Result<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        let products = cursor.try_collect().await?;
        Ok(products)
    }

    async fn ping(&self) -> Result<()> {
        self.collection.estimated_document_count().await?;
        Ok(())
    }
}
