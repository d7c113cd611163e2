//! Typed client for the `/api` surface

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ClientError;
use crate::model::{
    AdminLoginRequest, BookingRequest, BookingResponse, ContainerType, DeliveryTerm, LoginRequest,
    MessageResponse, Port, RegisterRequest, RegisterResponse, SearchQuery, SearchResult,
    ShippingRoute, Token, WebhookUrl,
};

/// Backend operations used by the customer application and the back office
///
/// Methods taking a `token` send it as a bearer credential.
#[async_trait]
pub trait CargoApi: Send + Sync {
    async fn ports(&self) -> Result<Vec<Port>, ClientError>;
    async fn container_types(&self) -> Result<Vec<ContainerType>, ClientError>;
    async fn delivery_terms(&self) -> Result<Vec<DeliveryTerm>, ClientError>;
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ClientError>;

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError>;
    async fn login(&self, request: &LoginRequest) -> Result<Token, ClientError>;
    async fn admin_login(&self, request: &AdminLoginRequest) -> Result<Token, ClientError>;

    async fn book(
        &self,
        token: &str,
        request: &BookingRequest,
    ) -> Result<BookingResponse, ClientError>;

    async fn admin_container_types(&self, token: &str) -> Result<Vec<ContainerType>, ClientError>;
    async fn admin_create_container_type(
        &self,
        token: &str,
        container: &ContainerType,
    ) -> Result<ContainerType, ClientError>;
    async fn admin_delete_container_type(&self, token: &str, id: &str) -> Result<(), ClientError>;

    async fn admin_routes(&self, token: &str) -> Result<Vec<ShippingRoute>, ClientError>;
    async fn admin_create_route(
        &self,
        token: &str,
        route: &ShippingRoute,
    ) -> Result<ShippingRoute, ClientError>;
    async fn admin_delete_route(&self, token: &str, id: &str) -> Result<(), ClientError>;

    async fn webhook_url(&self, token: &str) -> Result<String, ClientError>;
    async fn set_webhook_url(&self, token: &str, url: &str) -> Result<(), ClientError>;
}

/// `CargoApi` over HTTP
#[derive(Clone, Debug)]
pub struct HttpApi {
    base_url: String,
    http: Client,
}

impl HttpApi {
    /// `base_url` is the backend origin, e.g. `http://localhost:8080`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            let message = body
                .as_ref()
                .and_then(|body| body.get("error").or_else(|| body.get("detail")))
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());

            tracing::debug!(status = status.as_u16(), %message, "request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CargoApi for HttpApi {
    async fn ports(&self) -> Result<Vec<Port>, ClientError> {
        self.send(self.http.get(self.url("/ports"))).await
    }

    async fn container_types(&self) -> Result<Vec<ContainerType>, ClientError> {
        self.send(self.http.get(self.url("/container-types"))).await
    }

    async fn delivery_terms(&self) -> Result<Vec<DeliveryTerm>, ClientError> {
        self.send(self.http.get(self.url("/delivery-terms"))).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ClientError> {
        self.send(self.http.post(self.url("/search")).json(query))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        self.send(self.http.post(self.url("/register")).json(request))
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<Token, ClientError> {
        self.send(self.http.post(self.url("/login")).json(request))
            .await
    }

    async fn admin_login(&self, request: &AdminLoginRequest) -> Result<Token, ClientError> {
        self.send(self.http.post(self.url("/admin/login")).json(request))
            .await
    }

    async fn book(
        &self,
        token: &str,
        request: &BookingRequest,
    ) -> Result<BookingResponse, ClientError> {
        let builder = self
            .http
            .post(self.url("/booking"))
            .bearer_auth(token)
            .json(request);
        self.send(builder).await
    }

    async fn admin_container_types(&self, token: &str) -> Result<Vec<ContainerType>, ClientError> {
        let builder = self
            .http
            .get(self.url("/admin/container-types"))
            .bearer_auth(token);
        self.send(builder).await
    }

    async fn admin_create_container_type(
        &self,
        token: &str,
        container: &ContainerType,
    ) -> Result<ContainerType, ClientError> {
        let builder = self
            .http
            .post(self.url("/admin/container-types"))
            .bearer_auth(token)
            .json(container);
        self.send(builder).await
    }

    async fn admin_delete_container_type(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let builder = self
            .http
            .delete(self.url(&format!("/admin/container-types/{id}")))
            .bearer_auth(token);
        self.send::<MessageResponse>(builder).await.map(|_| ())
    }

    async fn admin_routes(&self, token: &str) -> Result<Vec<ShippingRoute>, ClientError> {
        let builder = self.http.get(self.url("/admin/routes")).bearer_auth(token);
        self.send(builder).await
    }

    async fn admin_create_route(
        &self,
        token: &str,
        route: &ShippingRoute,
    ) -> Result<ShippingRoute, ClientError> {
        let builder = self
            .http
            .post(self.url("/admin/routes"))
            .bearer_auth(token)
            .json(route);
        self.send(builder).await
    }

    async fn admin_delete_route(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let builder = self
            .http
            .delete(self.url(&format!("/admin/routes/{id}")))
            .bearer_auth(token);
        self.send::<MessageResponse>(builder).await.map(|_| ())
    }

    async fn webhook_url(&self, token: &str) -> Result<String, ClientError> {
        let builder = self.http.get(self.url("/admin/webhook")).bearer_auth(token);
        let settings: WebhookUrl = self.send(builder).await?;
        Ok(settings.webhook_url)
    }

    async fn set_webhook_url(&self, token: &str, url: &str) -> Result<(), ClientError> {
        let body = WebhookUrl {
            webhook_url: url.to_string(),
        };
        let builder = self
            .http
            .post(self.url("/admin/webhook"))
            .bearer_auth(token)
            .json(&body);
        self.send::<MessageResponse>(builder).await.map(|_| ())
    }
}
