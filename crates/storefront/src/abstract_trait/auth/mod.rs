use crate::domain::{requests::user::LoginRequest, response::user::LoginResponse};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynLoginService = Arc<dyn LoginServiceTrait + Send + Sync>;

#[async_trait]
pub trait LoginServiceTrait {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<LoginResponse>, ServiceError>;
}
