use crate::{
    abstract_trait::{
        cart::{
            repository::{DynCartCommandRepository, DynCartQueryRepository},
            service::CartCommandServiceTrait,
        },
        product::repository::DynProductQueryRepository,
        user::repository::DynUserQueryRepository,
    },
    domain::{
        requests::{
            cart::{AddToCartRequest, MAX_LINE_QUANTITY},
            validation_messages,
        },
        response::cart::CartResponse,
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct CartCommandService {
    pub command: DynCartCommandRepository,
    pub query: DynCartQueryRepository,
    pub user_query: DynUserQueryRepository,
    pub product_query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl CartCommandService {
    pub fn new(
        command: DynCartCommandRepository,
        query: DynCartQueryRepository,
        user_query: DynUserQueryRepository,
        product_query: DynProductQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "cart_command_service", "cart command service");

        Self {
            command,
            query,
            user_query,
            product_query,
            metrics,
        }
    }
}

#[async_trait]
impl CartCommandServiceTrait for CartCommandService {
    async fn add_to_cart(
        &self,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!(
            "➕ Adding product {} x{} to cart of user {}",
            req.product_id, req.quantity, req.user_id
        );

        let tracing_ctx = TracingContext::start("cart", "add_to_cart", Method::Post);

        let result = async {
            req.validate()
                .map_err(|e| ServiceError::Validation(validation_messages(&e)))?;

            self.user_query
                .find_by_id(req.user_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("User".into()))?;

            self.product_query
                .find_by_id(req.product_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Product".into()))?;

            let cart = self
                .command
                .add_item(req.user_id, req.product_id, req.quantity)
                .await
                .map_err(|e| match e {
                    RepositoryError::OutOfRange(_) => ServiceError::Validation(vec![format!(
                        "quantity: a cart line holds at most {MAX_LINE_QUANTITY} units"
                    )]),
                    other => ServiceError::Repo(other),
                })?;

            let items = self.query.find_items(cart.id).await?;
            Ok(CartResponse::from_parts(cart, items))
        }
        .await;

        match result {
            Ok(cart) => {
                tracing_ctx.complete_success(
                    &self.metrics,
                    &format!("Cart {:?} now has {} units", cart.id, cart.total_quantity),
                );
                Ok(ApiResponse::success("Product added to cart", cart))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Failed to add to cart: {e}"));
                Err(e)
            }
        }
    }
}
