use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    pub id: i32,
    pub user_id: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A `cart_items` row joined with its product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItemDetail {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub stock: i32,
    pub quantity: i32,
    pub added_at: Option<NaiveDateTime>,
}
