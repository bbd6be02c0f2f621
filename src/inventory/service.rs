use super::models::{Product, ProductId, ProductInput};
use crate::api::ApiClient;
use crate::common::ClientError;

pub async fn list_products(api: &ApiClient) -> Result<Vec<Product>, ClientError> {
    api.get("/inventory").await
}

pub async fn create_product(api: &ApiClient, input: &ProductInput) -> Result<Product, ClientError> {
    api.post("/inventory", input).await
}

pub async fn update_product(
    api: &ApiClient,
    id: ProductId,
    input: &ProductInput,
) -> Result<Product, ClientError> {
    api.put(&format!("/inventory/{}", id), input).await
}

pub async fn delete_product(api: &ApiClient, id: ProductId) -> Result<(), ClientError> {
    api.delete(&format!("/inventory/{}", id)).await
}
