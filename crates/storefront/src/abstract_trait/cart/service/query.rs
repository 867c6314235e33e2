use crate::domain::response::cart::CartResponse;
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynCartQueryService = Arc<dyn CartQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartQueryServiceTrait {
    async fn get_cart(&self, user_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError>;
}
