// src/api/client.rs
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::auth::SessionContext;
use crate::common::{ClientConfig, ClientError};

/// HTTP client for the back office resource API.
///
/// Every request is sent under the configured base URL and carries the
/// current session token as a bearer credential when one is stored.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: SessionContext) -> Result<Self, ClientError> {
        let http = Client::builder()
            .no_proxy()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let builder = self.http.request(method, self.url(path));
        Ok(match self.session.token()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let req = self.request(Method::GET, path)?;
        self.send_json(Method::GET, path, req).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::GET, path)?.query(query);
        self.send_json(Method::GET, path, req).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::POST, path)?.json(body);
        self.send_json(Method::POST, path, req).await
    }

    /// POST with no body, used for action sub-resources such as `/orders/{id}/cancel`
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let req = self.request(Method::POST, path)?;
        self.send_json(Method::POST, path, req).await
    }

    pub async fn post_form<B, T>(&self, path: &str, form: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::POST, path)?.form(form);
        self.send_json(Method::POST, path, req).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::PUT, path)?.json(body);
        self.send_json(Method::PUT, path, req).await
    }

    /// DELETE; the confirmation body is discarded
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, path)?;
        self.send(Method::DELETE, path, req).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<String, ClientError> {
        debug!(method = %method, path = %path, "API request");

        let response = req.send().await.map_err(|e| {
            error!(method = %method, path = %path, error = %e, "API request could not be sent");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(method = %method, path = %path, status = %status, "API request failed");
            return Err(ClientError::from_response(status, &body));
        }

        debug!(method = %method, path = %path, status = %status, "API response");
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<T, ClientError> {
        let body = self.send(method, path, req).await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            error!(path = %path, error = %e, "Response did not match the expected shape");
            ClientError::InvalidResponse(format!("{}: {}", path, e))
        })
    }
}
