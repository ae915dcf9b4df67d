use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{ImageUpload, Product, ProductSubmission},
};

pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Product>)> {
    let submission = read_submission(multipart).await?;
    let product = state.products.create_product(submission).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.products.list_products().await?;

    Ok(Json(products))
}

/// Walks the multipart body collecting the known text fields. Any part that
/// carries a file name is taken as the image upload.
async fn read_submission(mut multipart: Multipart) -> Result<ProductSubmission> {
    let mut submission = ProductSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid multipart request: {}", e)))?;

            submission.image = Some(ImageUpload {
                file_name,
                content_type,
                data: data.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart request: {}", e)))?;

        match field_name.as_str() {
            "name" => submission.name = Some(value),
            "description" => submission.description = Some(value),
            "price" => submission.price = Some(value),
            "category" => submission.category = Some(value),
            _ => {}
        }
    }

    Ok(submission)
}
