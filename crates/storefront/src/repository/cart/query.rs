use crate::{
    abstract_trait::cart::repository::CartQueryRepositoryTrait,
    model::{Cart as CartModel, CartItemDetail},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct CartQueryRepository {
    db: ConnectionPool,
}

impl CartQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for CartQueryRepository {
    async fn find_by_user(&self, user_id: i32) -> Result<Option<CartModel>, RepositoryError> {
        info!("🛒 Fetching cart of user {}", user_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let cart = sqlx::query_as::<_, CartModel>(
            r#"
            SELECT id, user_id, created_at, updated_at
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch cart of user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        Ok(cart)
    }

    async fn find_items(&self, cart_id: i32) -> Result<Vec<CartItemDetail>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let items = sqlx::query_as::<_, CartItemDetail>(
            r#"
            SELECT
                p.id AS product_id,
                p.name,
                p.description,
                p.price,
                p.image,
                p.stock,
                ci.quantity,
                ci.created_at AS added_at
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.created_at ASC, p.id ASC
            "#,
        )
        .bind(cart_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch items of cart {}: {:?}", cart_id, e);
            RepositoryError::from(e)
        })?;

        Ok(items)
    }
}
