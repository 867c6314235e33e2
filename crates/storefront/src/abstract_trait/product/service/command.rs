use crate::domain::{
    requests::product::{CreateProductRequest, ImageUpload},
    response::product::ProductResponse,
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        image: Option<ImageUpload>,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
