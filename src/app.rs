use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    config::{self, AppConfig},
    database::{self, MongoProductStore},
    error::Result,
    routes,
    services::ProductService,
    storage::S3BlobStore,
};

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

/// Constructs the external-service adapters once and wires them into the
/// router. Both clients are long-lived and shared across requests.
pub async fn build(config: &AppConfig) -> Result<Router> {
    let s3_client = config::load_s3_client(&config.storage).await?;
    let blobs = S3BlobStore::new(
        s3_client,
        config.storage.bucket.clone(),
        config.storage.public_url.clone(),
    )
    .await;

    let collection = database::connect(&config.database).await?;
    let store = MongoProductStore::new(collection);

    let state = AppState {
        products: ProductService::new(Arc::new(blobs), Arc::new(store)),
    };

    Ok(router(state, config.server.max_body_size))
}

pub fn router(state: AppState, max_body_size: usize) -> Router {
    // Open to any origin per the public catalog contract.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    routes::create_router()
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(cors)
        .with_state(state)
}
