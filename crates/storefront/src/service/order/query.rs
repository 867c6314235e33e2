use crate::{
    abstract_trait::order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
    domain::{requests::order::FindAllOrders, response::order::OrderResponse},
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
pub struct OrderQueryService {
    pub query: DynOrderQueryRepository,
    pub metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_query_service", "order query service");

        Self { query, metrics }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        info!(
            "🔍 Finding all orders | Page: {}, Size: {}, User: {:?}",
            req.page, req.page_size, req.user_id
        );

        let (page, page_size) = Pagination::normalize(req.page, req.page_size);
        let normalized = FindAllOrders {
            page,
            page_size,
            user_id: req.user_id,
        };

        let tracing_ctx = TracingContext::start("order", "find_all", Method::Get);

        let (orders, total) = match self.query.find_all(&normalized).await {
            Ok(res) => {
                tracing_ctx.complete_success(
                    &self.metrics,
                    &format!("Retrieved {} orders from DB", res.0.len()),
                );
                res
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Failed to fetch orders: {e}"));
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();

        Ok(ApiResponsePagination::success(
            "Orders retrieved successfully",
            data,
            Pagination::new(page, page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🆔 Finding order by ID: {id}");

        let tracing_ctx = TracingContext::start("order", "find_by_id", Method::Get);

        match self.query.find_by_id(id).await {
            Ok(Some(order)) => {
                tracing_ctx.complete_success(&self.metrics, "Order retrieved");
                Ok(ApiResponse::success(
                    "Order retrieved successfully",
                    OrderResponse::from(order),
                ))
            }
            Ok(None) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Order {id} not found"));
                Err(ServiceError::NotFound("Order".into()))
            }
            Err(e) => {
                tracing_ctx
                    .complete_error(&self.metrics, &format!("Failed to fetch order {id}: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }
}
