#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{NaiveDateTime, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{Hashing, JwtConfig},
    domain::responses::Pagination,
    errors::RepositoryError,
};
use std::sync::{Arc, Mutex};
use storefront::{
    abstract_trait::{
        cart::repository::{CartCommandRepositoryTrait, CartQueryRepositoryTrait},
        order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        product::repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
        user::repository::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    },
    di::{DependenciesInjectDeps, Repositories},
    domain::requests::{
        order::{CreateOrderRecord, FindAllOrders},
        cart::MAX_LINE_QUANTITY,
        product::{CreateProductRecord, FindAllProducts},
        user::{CreateUserRecord, FindAllUsers, UpdateUserRequest},
    },
    handler::AppRouter,
    model::{Cart, CartItemDetail, Order, Product, User},
    state::AppState,
    storage::UploadStore,
};
use tempfile::TempDir;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const BOUNDARY: &str = "storefront-test-boundary";

struct CartLine {
    cart_id: i32,
    product_id: i32,
    quantity: i32,
    added_at: NaiveDateTime,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    products: Vec<Product>,
    orders: Vec<Order>,
    carts: Vec<Cart>,
    cart_lines: Vec<CartLine>,
    failing_product_inserts: bool,
}

/// Table-for-table stand-in for Postgres behind the repository traits.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

fn now() -> Option<NaiveDateTime> {
    Some(Utc::now().naive_utc())
}

fn page<T: Clone>(rows: Vec<T>, page: i32, page_size: i32) -> (Vec<T>, i64) {
    let total = rows.len() as i64;
    let offset = Pagination::offset(page, page_size) as usize;
    let rows = rows
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .collect();
    (rows, total)
}

impl InMemoryStore {
    pub fn seed_product(&self, name: &str, price: f64, stock: i32) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.products.len() as i32 + 1;
        tables.products.push(Product {
            id,
            name: name.to_string(),
            description: None,
            price,
            image: None,
            stock,
            created_at: now(),
            updated_at: now(),
        });
        id
    }

    pub fn cart_line_count(&self) -> usize {
        self.tables.lock().unwrap().cart_lines.len()
    }

    /// Makes every later product insert fail.
    pub fn fail_product_inserts(&self) {
        self.tables.lock().unwrap().failing_product_inserts = true;
    }

    pub fn cart_count(&self) -> usize {
        self.tables.lock().unwrap().carts.len()
    }

    pub fn repositories(&self) -> Repositories {
        let store = Arc::new(self.clone());
        Repositories {
            user_query: store.clone(),
            user_command: store.clone(),
            product_query: store.clone(),
            product_command: store.clone(),
            order_query: store.clone(),
            order_command: store.clone(),
            cart_query: store.clone(),
            cart_command: store,
        }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for InMemoryStore {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<User>, i64), RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let needle = req.search.to_lowercase();
        let mut rows: Vec<User> = tables
            .users
            .iter()
            .filter(|u| {
                needle.is_empty()
                    || u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        rows.reverse();
        Ok(page(rows, req.page, req.page_size))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for InMemoryStore {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<User, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == req.email) {
            return Err(RepositoryError::AlreadyExists("users_email_key".into()));
        }

        let user = User {
            id: tables.users.len() as i32 + 1,
            name: req.name.clone(),
            email: req.email.clone(),
            password: req.password_hash.clone(),
            created_at: now(),
            updated_at: now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, req: &UpdateUserRequest) -> Result<User, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let id = req
            .id
            .ok_or_else(|| RepositoryError::Custom("user id is required for update".into()))?;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            user.name = name.clone();
        }
        if let Some(email) = &req.email {
            user.email = email.clone();
        }
        user.updated_at = now();
        Ok(user.clone())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryStore {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let needle = req.search.to_lowercase();
        let mut rows: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        rows.reverse();
        Ok(page(rows, req.page, req.page_size))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryStore {
    async fn create_product(&self, req: &CreateProductRecord) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.failing_product_inserts {
            return Err(RepositoryError::Custom("products table unavailable".into()));
        }

        let product = Product {
            id: tables.products.len() as i32 + 1,
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            image: req.image.clone(),
            stock: req.stock,
            created_at: now(),
            updated_at: now(),
        };
        tables.products.push(product.clone());
        Ok(product)
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryStore {
    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Order> = tables
            .orders
            .iter()
            .filter(|o| req.user_id.is_none_or(|user_id| o.user_id == user_id))
            .cloned()
            .collect();
        rows.reverse();
        Ok(page(rows, req.page, req.page_size))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryStore {
    async fn create_order(&self, req: &CreateOrderRecord) -> Result<Order, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == req.user_id) {
            return Err(RepositoryError::ForeignKey("orders_user_id_fkey".into()));
        }

        let order = Order {
            id: tables.orders.len() as i32 + 1,
            user_id: req.user_id,
            total_amount: req.total_amount,
            status: req.status.clone(),
            address: req.address.clone(),
            created_at: now(),
            updated_at: now(),
        };
        tables.orders.push(order.clone());
        Ok(order)
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for InMemoryStore {
    async fn find_by_user(&self, user_id: i32) -> Result<Option<Cart>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.carts.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn find_items(&self, cart_id: i32) -> Result<Vec<CartItemDetail>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let items = tables
            .cart_lines
            .iter()
            .filter(|line| line.cart_id == cart_id)
            .filter_map(|line| {
                let product = tables.products.iter().find(|p| p.id == line.product_id)?;
                Some(CartItemDetail {
                    product_id: product.id,
                    name: product.name.clone(),
                    description: product.description.clone(),
                    price: product.price,
                    image: product.image.clone(),
                    stock: product.stock,
                    quantity: line.quantity,
                    added_at: Some(line.added_at),
                })
            })
            .collect();
        Ok(items)
    }
}

#[async_trait]
impl CartCommandRepositoryTrait for InMemoryStore {
    async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Cart, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();

        let existing = tables
            .carts
            .iter()
            .find(|c| c.user_id == user_id)
            .and_then(|cart| {
                tables
                    .cart_lines
                    .iter()
                    .find(|line| line.cart_id == cart.id && line.product_id == product_id)
            })
            .map_or(0, |line| line.quantity);

        // mirrors the cart_items_quantity_range check constraint
        if existing + quantity > MAX_LINE_QUANTITY {
            return Err(RepositoryError::OutOfRange(
                "cart_items_quantity_range".into(),
            ));
        }

        let cart = match tables.carts.iter().find(|c| c.user_id == user_id) {
            Some(cart) => cart.clone(),
            None => {
                let cart = Cart {
                    id: tables.carts.len() as i32 + 1,
                    user_id,
                    created_at: now(),
                    updated_at: now(),
                };
                tables.carts.push(cart.clone());
                cart
            }
        };

        match tables
            .cart_lines
            .iter_mut()
            .find(|line| line.cart_id == cart.id && line.product_id == product_id)
        {
            Some(line) => line.quantity += quantity,
            None => tables.cart_lines.push(CartLine {
                cart_id: cart.id,
                product_id,
                quantity,
                added_at: Utc::now().naive_utc(),
            }),
        }

        Ok(cart)
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: InMemoryStore,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let store = InMemoryStore::default();
        let upload_dir = tempfile::tempdir().unwrap();

        let deps = DependenciesInjectDeps {
            repositories: store.repositories(),
            hashing: Arc::new(Hashing::with_cost(4)) as DynHashing,
            jwt: Arc::new(JwtConfig::new(JWT_SECRET)) as DynJwtService,
            uploads: UploadStore::new(upload_dir.path()),
        };

        let router = AppRouter::build(AppState::from_deps(deps));

        Self {
            router,
            store,
            upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(
            Request::get(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_json("POST", uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_json("PUT", uri, body).await
    }

    async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_multipart(&self, uri: &str, body: Vec<u8>) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Registers a user through the API and returns its id.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> i64 {
        let (status, body) = self
            .post_json(
                "/api/users",
                serde_json::json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["data"]["id"].as_i64().unwrap()
    }
}

/// Builds a `multipart/form-data` body with `BOUNDARY`.
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.bytes
    }
}
