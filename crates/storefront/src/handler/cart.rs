use crate::{
    abstract_trait::cart::service::{DynCartCommandService, DynCartQueryService},
    domain::{requests::cart::AddToCartRequest, response::cart::CartResponse},
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    domain::responses::ApiResponse,
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart/{user_id}",
    tag = "Cart",
    params(("user_id" = i32, Path, description = "Owner of the cart")),
    responses(
        (status = 200, description = "The user's cart, empty if none exists", body = ApiResponse<CartResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartQueryService>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_cart(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/add",
    tag = "Cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Updated cart", body = ApiResponse<CartResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "User or product not found", body = ErrorResponse)
    )
)]
pub async fn add_to_cart(
    Extension(service): Extension<DynCartCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddToCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_to_cart(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cart/add", post(add_to_cart))
        .route("/api/cart/{user_id}", get(get_cart))
        .layer(Extension(app_state.di_container.cart_query.clone()))
        .layer(Extension(app_state.di_container.cart_command.clone()))
}
