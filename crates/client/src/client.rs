use crate::{
    error::ClientError,
    models::{
        AddToCartRequest, Cart, Envelope, ErrorBody, LoginRequest, LoginResponse, Order, Paged,
        PlaceOrderRequest, Product, RegisterRequest, UpdateProfileRequest, User,
    },
};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed access to the storefront REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            token: None,
        })
    }

    pub fn with_default_url() -> Result<Self, ClientError> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Sends `Authorization: Bearer <token>` on every following request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, "/users/login", &body).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<User, ClientError> {
        self.send_json(Method::POST, "/users", req).await
    }

    /// Nothing to tell the server; tokens simply expire.
    pub fn logout(&self) -> bool {
        true
    }

    pub async fn get_profile(&self, user_id: i32) -> Result<User, ClientError> {
        self.get(&format!("/users/{user_id}")).await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.get("/users/me").await
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<User, ClientError> {
        self.send_json(Method::PUT, &format!("/users/{user_id}"), req)
            .await
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, ClientError> {
        let page: Paged<Product> = self.fetch(self.request(Method::GET, "/products")).await?;
        Ok(page.data)
    }

    pub async fn get_product_details(&self, product_id: i32) -> Result<Product, ClientError> {
        self.get(&format!("/products/{product_id}")).await
    }

    pub async fn get_cart(&self, user_id: i32) -> Result<Cart, ClientError> {
        self.get(&format!("/cart/{user_id}")).await
    }

    pub async fn add_to_cart(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Cart, ClientError> {
        let body = AddToCartRequest {
            user_id,
            product_id,
            quantity,
        };
        self.send_json(Method::POST, "/cart/add", &body).await
    }

    pub async fn place_order(&self, req: &PlaceOrderRequest) -> Result<Order, ClientError> {
        self.send_json(Method::POST, "/orders", req).await
    }

    pub async fn get_orders(&self, user_id: Option<i32>) -> Result<Vec<Order>, ClientError> {
        let mut request = self.request(Method::GET, "/orders");
        if let Some(user_id) = user_id {
            request = request.query(&[("user_id", user_id)]);
        }

        let page: Paged<Order> = self.fetch(request).await?;
        Ok(page.data)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!("{method} {url}");

        let request = self.http.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let envelope: Envelope<T> = self.fetch(self.request(Method::GET, path)).await?;
        Ok(envelope.data)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let envelope: Envelope<T> = self.fetch(self.request(method, path).json(body)).await?;
        Ok(envelope.data)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);

    warn!("API responded {status}: {message}");

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_base_url_without_scheme() {
        let err = ApiClient::new("localhost:5000/api").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://10.0.2.2:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://10.0.2.2:5000/api");
        assert!(client.logout());
    }
}
