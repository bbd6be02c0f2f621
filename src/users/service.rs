use super::models::{NewUser, User, UserId};
use crate::api::ApiClient;
use crate::common::ClientError;

pub async fn list_users(api: &ApiClient) -> Result<Vec<User>, ClientError> {
    api.get("/users").await
}

pub async fn create_user(api: &ApiClient, user: &NewUser) -> Result<User, ClientError> {
    api.post("/users", user).await
}

pub async fn delete_user(api: &ApiClient, id: UserId) -> Result<(), ClientError> {
    api.delete(&format!("/users/{}", id)).await
}
