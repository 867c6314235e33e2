use crate::model::{Cart as CartModel, CartItemDetail};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCartQueryRepository = Arc<dyn CartQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartQueryRepositoryTrait {
    async fn find_by_user(&self, user_id: i32) -> Result<Option<CartModel>, RepositoryError>;
    async fn find_items(&self, cart_id: i32) -> Result<Vec<CartItemDetail>, RepositoryError>;
}
