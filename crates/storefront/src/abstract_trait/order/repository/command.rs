use crate::{domain::requests::order::CreateOrderRecord, model::Order as OrderModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    async fn create_order(&self, req: &CreateOrderRecord) -> Result<OrderModel, RepositoryError>;
}
