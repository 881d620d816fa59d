use reqwest::multipart::{Form, Part};

use crate::api::{ApiClient, ApiError};
use crate::models::{ImageAsset, Product, ProductPayload, ProductsPage};

pub async fn list(client: &ApiClient, limit: u32) -> Result<ProductsPage, ApiError> {
    client.get(&format!("/productos?limite={}", limit)).await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Product, ApiError> {
    client.get(&format!("/productos/{}", id)).await
}

pub async fn create(client: &ApiClient, payload: &ProductPayload) -> Result<Product, ApiError> {
    client.post("/productos", payload).await
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    payload: &ProductPayload,
) -> Result<Product, ApiError> {
    client.put(&format!("/productos/{}", id), payload).await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/productos/{}", id)).await
}

/// Sends one picked image as the `archivo` multipart field.
pub async fn upload_image(
    client: &ApiClient,
    id: &str,
    asset: ImageAsset,
) -> Result<Product, ApiError> {
    let part = Part::bytes(asset.bytes)
        .file_name(asset.file_name)
        .mime_str(&asset.mime_type)?;
    let form = Form::new().part("archivo", part);

    client
        .put_multipart(&format!("/uploads/productos/{}", id), form)
        .await
}
