use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use catalog_back::{
    app::{self, AppState},
    database::MemoryProductStore,
    services::ProductService,
    storage::MemoryBlobStore,
};

const BOUNDARY: &str = "test-boundary";
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

fn test_app() -> (Router, MemoryBlobStore, MemoryProductStore) {
    let blobs = MemoryBlobStore::new();
    let store = MemoryProductStore::new();

    let state = AppState {
        products: ProductService::new(Arc::new(blobs.clone()), Arc::new(store.clone())),
    };

    (app::router(state, MAX_BODY_SIZE), blobs, store)
}

fn failing_store_app() -> Router {
    let state = AppState {
        products: ProductService::new(
            Arc::new(MemoryBlobStore::new()),
            Arc::new(MemoryProductStore::new().with_failure()),
        ),
    };

    app::router(state, MAX_BODY_SIZE)
}

struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn build(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.buf
    }
}

fn post_products(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/products")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get_products() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/products")
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn chair_submission() -> MultipartBody {
    MultipartBody::new()
        .text("name", "Chair")
        .text("price", "49.99")
        .text("category", "Furniture")
}

#[tokio::test]
async fn post_without_image_returns_created_product() {
    let (app, _, store) = test_app();

    let response = app.oneshot(post_products(chair_submission().build())).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["name"], "Chair");
    assert_eq!(body["description"], "");
    assert_eq!(body["price"], 49.99);
    assert_eq!(body["category"], "Furniture");
    assert_eq!(body["imageUrl"], "");
    assert_eq!(store.insert_count(), 1);
}

#[tokio::test]
async fn post_with_image_returns_url_containing_file_name() {
    let (app, blobs, _) = test_app();

    let body = chair_submission()
        .file("image", "chair.png", "image/png", &[0x89, 0x50, 0x4e, 0x47])
        .build();

    let response = app.oneshot(post_products(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    let image_url = body["imageUrl"].as_str().unwrap();
    assert!(image_url.contains("chair.png"), "got {}", image_url);
    assert_eq!(blobs.store_count(), 1);
}

#[tokio::test]
async fn post_with_invalid_price_returns_400() {
    let (app, blobs, store) = test_app();

    let body = MultipartBody::new()
        .text("name", "Chair")
        .text("price", "free")
        .text("category", "Furniture")
        .build();

    let response = app.oneshot(post_products(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "Price must be a valid number." })
    );
    assert_eq!(blobs.store_count(), 0);
    assert_eq!(store.insert_count(), 0);
}

#[tokio::test]
async fn post_with_missing_fields_returns_400() {
    let cases = [
        (
            MultipartBody::new()
                .text("price", "49.99")
                .text("category", "Furniture")
                .build(),
            "Name is required.",
        ),
        (
            MultipartBody::new()
                .text("name", "Chair")
                .text("category", "Furniture")
                .build(),
            "Price must be a valid number.",
        ),
        (
            MultipartBody::new()
                .text("name", "Chair")
                .text("price", "49.99")
                .build(),
            "Category is required.",
        ),
    ];

    for (body, expected) in cases {
        let (app, blobs, store) = test_app();
        let response = app.oneshot(post_products(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], expected);
        assert_eq!(blobs.store_count(), 0);
        assert_eq!(store.insert_count(), 0);
    }
}

#[tokio::test]
async fn post_with_non_image_file_returns_400() {
    let (app, blobs, store) = test_app();

    let body = chair_submission()
        .file("image", "notes.txt", "text/plain", b"plain text")
        .build();

    let response = app.oneshot(post_products(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Only image uploads are allowed."
    );
    assert_eq!(blobs.store_count(), 0);
    assert_eq!(store.insert_count(), 0);
}

#[tokio::test]
async fn post_with_oversized_file_returns_400() {
    let (app, blobs, store) = test_app();

    let oversized = vec![0u8; 5 * 1024 * 1024 + 1];
    let body = chair_submission()
        .file("image", "huge.png", "image/png", &oversized)
        .build();

    let response = app.oneshot(post_products(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "File too large. Maximum size is 5 MB."
    );
    assert_eq!(blobs.store_count(), 0);
    assert_eq!(store.insert_count(), 0);
}

#[tokio::test]
async fn get_on_empty_collection_returns_empty_array() {
    let (app, _, _) = test_app();

    let response = app.oneshot(get_products()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn listing_is_idempotent_after_a_write() {
    let (app, _, _) = test_app();

    let response = app
        .clone()
        .oneshot(post_products(chair_submission().build()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let first = json_body(app.clone().oneshot(get_products()).await.unwrap()).await;
    let second = json_body(app.oneshot(get_products()).await.unwrap()).await;

    assert_eq!(first.as_array().unwrap().len(), 1);
    assert_eq!(first[0]["name"], "Chair");
    assert_eq!(first, second);
}

#[tokio::test]
async fn store_failure_returns_sanitized_500() {
    let app = failing_store_app();

    let response = app
        .clone()
        .oneshot(post_products(chair_submission().build()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "Database operation failed." })
    );

    let response = app.oneshot(get_products()).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "Database operation failed." })
    );
}

#[tokio::test]
async fn upload_failure_returns_sanitized_500_and_writes_nothing() {
    let store = MemoryProductStore::new();
    let state = AppState {
        products: ProductService::new(
            Arc::new(MemoryBlobStore::new().with_failure()),
            Arc::new(store.clone()),
        ),
    };
    let app = app::router(state, MAX_BODY_SIZE);

    let body = chair_submission()
        .file("image", "chair.png", "image/png", &[1, 2, 3])
        .build();

    let response = app.oneshot(post_products(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "Image upload failed." })
    );
    assert_eq!(store.insert_count(), 0);
}

#[tokio::test]
async fn health_check_is_ok() {
    let (app, _, _) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}
