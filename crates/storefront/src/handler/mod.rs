mod cart;
mod order;
mod product;
mod user;

use crate::{
    domain::{
        requests::{
            cart::AddToCartRequest,
            order::CreateOrderRequest,
            product::CreateProductForm,
            user::{CreateUserRequest, LoginRequest, UpdateUserRequest},
        },
        response::{
            cart::{CartItemResponse, CartResponse},
            order::OrderResponse,
            product::ProductResponse,
            user::{LoginResponse, UserResponse},
        },
    },
    storage::UPLOADS_ROUTE,
    state::AppState,
};
use anyhow::Result;
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::{
    domain::responses::Pagination, errors::ErrorResponse, utils::shutdown_signal,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::cart::cart_routes;
pub use self::order::order_routes;
pub use self::product::product_routes;
pub use self::user::user_routes;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        user::create_user,
        user::get_users,
        user::get_user,
        user::update_user,
        user::login_user,
        user::get_me,

        product::get_products,
        product::get_product,
        product::create_product,

        order::create_order,
        order::get_orders,
        order::get_order,

        cart::get_cart,
        cart::add_to_cart,
    ),
    components(schemas(
        CreateUserRequest,
        UpdateUserRequest,
        LoginRequest,
        CreateProductForm,
        CreateOrderRequest,
        AddToCartRequest,
        UserResponse,
        LoginResponse,
        ProductResponse,
        OrderResponse,
        CartResponse,
        CartItemResponse,
        Pagination,
        ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "User", description = "User endpoints"),
        (name = "Product", description = "Product endpoints"),
        (name = "Order", description = "Order endpoints"),
        (name = "Cart", description = "Cart endpoints"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn root_handler() -> &'static str {
    "E-Commerce API Running ✅"
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);
        let upload_dir = shared_state.upload_dir.clone();

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/", get(root_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(user_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(cart_routes(shared_state.clone()));

        let (app_router, api) = api_router.split_for_parts();

        app_router
            .nest_service(&format!("/{UPLOADS_ROUTE}"), ServeDir::new(upload_dir))
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
