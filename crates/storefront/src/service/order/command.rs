use crate::{
    abstract_trait::{
        order::{repository::DynOrderCommandRepository, service::OrderCommandServiceTrait},
        user::repository::DynUserQueryRepository,
    },
    domain::{
        requests::order::{CreateOrderRecord, CreateOrderRequest},
        response::order::OrderResponse,
    },
    model::STATUS_PLACED,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;

#[derive(Clone)]
pub struct OrderCommandService {
    pub command: DynOrderCommandRepository,
    pub user_query: DynUserQueryRepository,
    pub metrics: Metrics,
}

impl OrderCommandService {
    pub fn new(
        command: DynOrderCommandRepository,
        user_query: DynUserQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_command_service", "order command service");

        Self {
            command,
            user_query,
            metrics,
        }
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!(
            "🧾 Placing order for user {} | Total: {}",
            req.user_id, req.total_amount
        );

        let tracing_ctx = TracingContext::start("order", "create_order", Method::Post);

        let result = async {
            self.user_query
                .find_by_id(req.user_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("User".into()))?;

            // stock is not reserved and the total is taken as sent
            let record = CreateOrderRecord {
                user_id: req.user_id,
                total_amount: req.total_amount,
                status: STATUS_PLACED.to_string(),
                address: req.address.clone(),
            };

            Ok::<_, ServiceError>(self.command.create_order(&record).await?)
        }
        .await;

        match result {
            Ok(order) => {
                tracing_ctx.complete_success(&self.metrics, &format!("Order {} placed", order.id));
                Ok(ApiResponse::success(
                    "Order placed successfully",
                    OrderResponse::from(order),
                ))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Failed to place order: {e}"));
                Err(e)
            }
        }
    }
}
