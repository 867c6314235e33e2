use crate::{
    abstract_trait::cart::{repository::DynCartQueryRepository, service::CartQueryServiceTrait},
    domain::response::cart::CartResponse,
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
pub struct CartQueryService {
    pub query: DynCartQueryRepository,
    pub metrics: Metrics,
}

impl CartQueryService {
    pub fn new(query: DynCartQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "cart_query_service", "cart query service");

        Self { query, metrics }
    }
}

#[async_trait]
impl CartQueryServiceTrait for CartQueryService {
    async fn get_cart(&self, user_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!("🛒 Fetching cart of user {user_id}");

        let tracing_ctx = TracingContext::start("cart", "get_cart", Method::Get);

        let result = async {
            let Some(cart) = self.query.find_by_user(user_id).await? else {
                return Ok::<_, ServiceError>(CartResponse::empty(user_id));
            };

            let items = self.query.find_items(cart.id).await?;
            Ok(CartResponse::from_parts(cart, items))
        }
        .await;

        match result {
            Ok(cart) => {
                tracing_ctx.complete_success(
                    &self.metrics,
                    &format!("Cart of user {user_id} has {} items", cart.items.len()),
                );
                Ok(ApiResponse::success("Cart retrieved successfully", cart))
            }
            Err(e) => {
                tracing_ctx
                    .complete_error(&self.metrics, &format!("Failed to fetch cart of {user_id}: {e}"));
                Err(e)
            }
        }
    }
}
