use super::models::{NewOrder, Order, OrderFilter, OrderId};
use crate::api::ApiClient;
use crate::common::ClientError;

pub async fn list_orders(api: &ApiClient, filter: &OrderFilter) -> Result<Vec<Order>, ClientError> {
    if filter.is_empty() {
        api.get("/orders").await
    } else {
        api.get_with_query("/orders", filter).await
    }
}

pub async fn get_order(api: &ApiClient, id: OrderId) -> Result<Order, ClientError> {
    api.get(&format!("/orders/{}", id)).await
}

pub async fn create_order(api: &ApiClient, order: &NewOrder) -> Result<Order, ClientError> {
    api.post("/orders", order).await
}

pub async fn cancel_order(api: &ApiClient, id: OrderId) -> Result<Order, ClientError> {
    api.post_action(&format!("/orders/{}/cancel", id)).await
}
