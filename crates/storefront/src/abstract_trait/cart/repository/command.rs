use crate::model::Cart as CartModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCartCommandRepository = Arc<dyn CartCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartCommandRepositoryTrait {
    /// Creates the user's cart if needed, then inserts the product with
    /// `quantity` or adds `quantity` to the existing line. Atomic.
    async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartModel, RepositoryError>;
}
