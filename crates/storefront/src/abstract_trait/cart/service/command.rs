use crate::domain::{requests::cart::AddToCartRequest, response::cart::CartResponse};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynCartCommandService = Arc<dyn CartCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartCommandServiceTrait {
    async fn add_to_cart(
        &self,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
}
