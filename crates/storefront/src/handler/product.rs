use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::product::{CreateProductForm, CreateProductRequest, FindAllProducts, ImageUpload},
        response::product::ProductResponse,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Multipart, Path, Query, multipart::Field},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    params(FindAllProducts),
    responses(
        (status = 200, description = "List of products", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    request_body(content = CreateProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let (body, image) = read_product_form(multipart).await?;

    let response = service.create_product(&body, image).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn read_product_form(
    mut multipart: Multipart,
) -> Result<(CreateProductRequest, Option<ImageUpload>), HttpError> {
    let mut name = None;
    let mut description = None;
    let mut price = None;
    let mut stock = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "name" => name = Some(field_text(field).await?),
            "description" => description = Some(field_text(field).await?),
            "price" => price = Some(field_text(field).await?),
            "stock" => stock = Some(field_text(field).await?),
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| HttpError::BadRequest(format!("Failed to read image: {e}")))?;

                // browsers send an empty part when no file was picked
                if !bytes.is_empty() {
                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let price = match price.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<f64>()
            .map_err(|_| HttpError::BadRequest(format!("price must be a number, got '{raw}'")))?,
        _ => return Err(HttpError::BadRequest("price is required".into())),
    };

    let stock = match stock.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<i32>()
            .map_err(|_| HttpError::BadRequest(format!("stock must be an integer, got '{raw}'")))?,
        _ => 0,
    };

    let request = CreateProductRequest {
        name: name.map(|n| n.trim().to_string()).unwrap_or_default(),
        description: description.filter(|d| !d.trim().is_empty()),
        price,
        stock,
    };

    Ok((request, image))
}

async fn field_text(field: Field<'_>) -> Result<String, HttpError> {
    field
        .text()
        .await
        .map_err(|e| HttpError::BadRequest(format!("Invalid form field: {e}")))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products", get(get_products).post(create_product))
        .route("/api/products/{id}", get(get_product))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
