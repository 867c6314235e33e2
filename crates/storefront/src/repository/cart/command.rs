use crate::{abstract_trait::cart::repository::CartCommandRepositoryTrait, model::Cart as CartModel};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct CartCommandRepository {
    db: ConnectionPool,
}

impl CartCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartCommandRepositoryTrait for CartCommandRepository {
    async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartModel, RepositoryError> {
        info!(
            "➕ Adding product {} x{} to cart of user {}",
            product_id, quantity, user_id
        );

        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        let cart = sqlx::query_as::<_, CartModel>(
            r#"
            INSERT INTO carts (user_id, created_at, updated_at)
            VALUES ($1, current_timestamp, current_timestamp)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = current_timestamp
            RETURNING id, user_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to upsert cart of user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, current_timestamp, current_timestamp)
            ON CONFLICT (cart_id, product_id) DO UPDATE
            SET quantity   = cart_items.quantity + EXCLUDED.quantity,
                updated_at = current_timestamp
            "#,
        )
        .bind(cart.id)
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to upsert product {} into cart {}: {:?}",
                product_id, cart.id, e
            );
            RepositoryError::from(e)
        })?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit cart transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Cart {} now holds product {}", cart.id, product_id);
        Ok(cart)
    }
}
