use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::{requests::product::FindAllProducts, response::product::ProductResponse},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination, Pagination},
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service", "product query service");

        Self { query, metrics }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!(
            "🔍 Finding all products | Page: {}, Size: {}, Search: '{}'",
            req.page, req.page_size, req.search
        );

        let (page, page_size) = Pagination::normalize(req.page, req.page_size);
        let normalized = FindAllProducts {
            page,
            page_size,
            search: req.search.clone(),
        };

        let tracing_ctx = TracingContext::start("product", "find_all", Method::Get);

        let (products, total) = match self.query.find_all(&normalized).await {
            Ok(res) => {
                tracing_ctx.complete_success(
                    &self.metrics,
                    &format!("Retrieved {} products from DB", res.0.len()),
                );
                res
            }
            Err(e) => {
                tracing_ctx
                    .complete_error(&self.metrics, &format!("Failed to fetch all products: {e}"));
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        info!("✅ Found {} products (total: {total})", data.len());

        Ok(ApiResponsePagination::success(
            "Products retrieved successfully",
            data,
            Pagination::new(page, page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let tracing_ctx = TracingContext::start("product", "find_by_id", Method::Get);

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                tracing_ctx.complete_success(&self.metrics, "Product retrieved");
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Product {id} not found"));
                Err(ServiceError::NotFound("Product".into()))
            }
            Err(e) => {
                tracing_ctx
                    .complete_error(&self.metrics, &format!("Failed to fetch product {id}: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }
}
