use std::sync::Arc;

use uuid::Uuid;

use crate::database::ProductStore;
use crate::error::{AppError, Result};
use crate::models::{ImageUpload, Product, ProductSubmission};
use crate::storage::BlobStore;

/// Maximum accepted image size (5 MiB).
const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Product intake and listing workflows over the two storage adapters.
///
/// Intake validates the submission, uploads the image when one is attached,
/// then writes the document. The upload and the insert are sequential and
/// not coupled: a blob whose insert fails afterwards is left in place.
#[derive(Clone)]
pub struct ProductService {
    blobs: Arc<dyn BlobStore>,
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(blobs: Arc<dyn BlobStore>, store: Arc<dyn ProductStore>) -> Self {
        Self { blobs, store }
    }

    pub async fn create_product(&self, submission: ProductSubmission) -> Result<Product> {
        let (name, price, category) = validate(&submission)?;

        let image_url = match &submission.image {
            Some(image) => {
                self.blobs
                    .store(&image.data, &image.content_type, &image.file_name)
                    .await?
            }
            None => String::new(),
        };

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name,
            description: submission.description.unwrap_or_default(),
            price,
            category,
            image_url,
        };

        let stored = self.store.insert(product).await?;

        tracing::info!("Created product {} ({})", stored.id, stored.name);

        Ok(stored)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.store.list_all().await
    }

    pub async fn check_ready(&self) -> Result<()> {
        self.store.ping().await
    }
}

/// Checks the submission field by field, stopping at the first failure.
/// Returns the coerced required fields.
fn validate(submission: &ProductSubmission) -> Result<(String, f64, String)> {
    let name = match submission.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(AppError::Validation("Name is required.".to_string())),
    };

    let price = submission
        .price
        .as_deref()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|price| price.is_finite())
        .ok_or_else(|| AppError::Validation("Price must be a valid number.".to_string()))?;

    let category = match submission.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => category.to_string(),
        _ => return Err(AppError::Validation("Category is required.".to_string())),
    };

    if let Some(image) = &submission.image {
        validate_image(image)?;
    }

    Ok((name, price, category))
}

fn validate_image(image: &ImageUpload) -> Result<()> {
    if !image.content_type.starts_with("image/") {
        return Err(AppError::Validation(
            "Only image uploads are allowed.".to_string(),
        ));
    }

    if image.data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::Validation(
            "File too large. Maximum size is 5 MB.".to_string(),
        ));
    }

    Ok(())
}
