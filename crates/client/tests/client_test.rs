use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use storefront_client::{ApiClient, ClientError, models::UpdateProfileRequest};
use tokio::net::TcpListener;

fn product_json(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "price": 10.0,
        "image": "uploads/a.png",
        "stock": 4,
        "created_at": "2025-01-01 10:00:00",
        "updated_at": "2025-01-01 10:00:00"
    })
}

fn stub_router() -> Router {
    Router::new()
        .route(
            "/api/products",
            get(|| async {
                Json(json!({
                    "status": "success",
                    "message": "Products retrieved successfully",
                    "data": [product_json(1, "Mug"), product_json(2, "Cable")],
                    "pagination": { "page": 1, "page_size": 10, "total_items": 2, "total_pages": 1 }
                }))
            }),
        )
        .route(
            "/api/products/{id}",
            get(|Path(id): Path<i32>| async move {
                if id == 1 {
                    (
                        StatusCode::OK,
                        Json(json!({ "status": "success", "message": "ok", "data": product_json(1, "Mug") })),
                    )
                } else {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({ "status": "error", "message": "Product not found" })),
                    )
                }
            }),
        )
        .route(
            "/api/orders",
            get(|| async {
                Json(json!({
                    "status": "success",
                    "message": "Orders retrieved successfully",
                    "data": [],
                    "pagination": { "page": 1, "page_size": 10, "total_items": 0, "total_pages": 0 }
                }))
            }),
        )
        .route(
            "/api/cart/add",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "status": "success",
                    "message": "Product added to cart",
                    "data": {
                        "id": 1,
                        "user_id": body["user_id"],
                        "items": [{
                            "product_id": body["product_id"],
                            "name": "Mug",
                            "description": null,
                            "price": 10.0,
                            "image": null,
                            "stock": 4,
                            "quantity": body["quantity"]
                        }],
                        "total_quantity": body["quantity"],
                        "subtotal": 20.0
                    }
                }))
            }),
        )
        .route(
            "/api/users/{id}",
            axum::routing::put(|Path(id): Path<i32>, Json(body): Json<Value>| async move {
                Json(json!({
                    "status": "success",
                    "message": "User updated successfully",
                    "data": { "id": id, "name": body["name"], "email": "asha@example.com",
                              "created_at": null, "updated_at": null }
                }))
            }),
        )
        .route(
            "/api/users/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "status": "error", "message": "Invalid credentials" })),
                )
            }),
        )
}

async fn spawn_router(router: Router) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    ApiClient::new(format!("http://{addr}/api")).unwrap()
}

async fn spawn_stub() -> ApiClient {
    spawn_router(stub_router()).await
}

fn empty_catalogue_router() -> Router {
    Router::new().route(
        "/api/products",
        get(|| async {
            Json(json!({
                "status": "success",
                "message": "Products retrieved successfully",
                "data": [],
                "pagination": { "page": 1, "page_size": 10, "total_items": 0, "total_pages": 0 }
            }))
        }),
    )
}

async fn unreachable_client() -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    ApiClient::new(format!("http://{addr}/api")).unwrap()
}

#[tokio::test]
async fn lists_products_from_envelope() {
    let client = spawn_stub().await;

    let products = client.get_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].name, "Cable");
    assert_eq!(products[0].image.as_deref(), Some("uploads/a.png"));
}

#[tokio::test]
async fn api_errors_carry_status_and_message() {
    let client = spawn_stub().await;

    let err = client.get_product_details(5).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, ClientError::Api { ref message, .. } if message == "Product not found"));

    let err = client.login("asha@example.com", "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn add_to_cart_and_update_profile_decode_data() {
    let client = spawn_stub().await;

    let cart = client.add_to_cart(3, 1, 2).await.unwrap();
    assert_eq!(cart.user_id, 3);
    assert_eq!(cart.items[0].quantity, 2);

    let user = client
        .update_profile(
            3,
            &UpdateProfileRequest {
                name: Some("Asha V".into()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.name, "Asha V");
}

#[tokio::test]
async fn live_data_is_not_marked_demo() {
    let client = spawn_stub().await;

    let products = client.products_or_demo().await;
    assert!(!products.is_demo);
    assert_eq!(products.data.len(), 2);

    let product = client.product_or_demo(1).await;
    assert!(!product.is_demo);
    assert_eq!(product.data.name, "Mug");
}

#[tokio::test]
async fn empty_order_history_shows_demo_orders() {
    let client = spawn_stub().await;

    let orders = client.orders_or_demo(3).await;

    assert!(orders.is_demo);
    assert_eq!(orders.data.len(), 3);
}

#[tokio::test]
async fn empty_catalogue_shows_demo_products() {
    let client = spawn_router(empty_catalogue_router()).await;

    assert!(client.get_products().await.unwrap().is_empty());

    let products = client.products_or_demo().await;
    assert!(products.is_demo);
    assert_eq!(products.data.len(), 6);
    assert_eq!(products.data[4].name, "Laptop Backpack");
}

#[tokio::test]
async fn unreachable_server_falls_back_to_demo_data() {
    let client = unreachable_client().await;

    let products = client.products_or_demo().await;
    assert!(products.is_demo);
    assert_eq!(products.data.len(), 6);
    assert_eq!(products.data[0].name, "Wireless Bluetooth Headphones");

    let product = client.product_or_demo(8).await;
    assert!(product.is_demo);
    assert_eq!(product.data.id, 8);

    let orders = client.orders_or_demo(3).await;
    assert!(orders.is_demo);
    assert!(orders.data.iter().all(|o| o.user_id == 3));

    assert!(client.get_cart(3).await.is_err());
}
