use mongodb::{Client, Collection};

use crate::{config::DatabaseConfig, error::Result, models::Product};

pub async fn connect(config: &DatabaseConfig) -> Result<Collection<Product>> {
    let client = Client::with_uri_str(&config.uri).await?;
    let collection = client
        .database(&config.database)
        .collection(&config.collection);

    tracing::info!(
        "Connected to database {} (collection {})",
        config.database,
        config.collection
    );

    Ok(collection)
}
