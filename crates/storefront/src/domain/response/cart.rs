use crate::model::{Cart as CartModel, CartItemDetail};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct CartItemResponse {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub stock: i32,
    pub quantity: i32,
}

impl From<CartItemDetail> for CartItemResponse {
    fn from(value: CartItemDetail) -> Self {
        CartItemResponse {
            product_id: value.product_id,
            name: value.name,
            description: value.description,
            price: value.price,
            image: value.image,
            stock: value.stock,
            quantity: value.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct CartResponse {
    /// `None` until the user's cart is first created.
    pub id: Option<i32>,
    pub user_id: i32,
    pub items: Vec<CartItemResponse>,
    pub total_quantity: i64,
    pub subtotal: f64,
}

impl CartResponse {
    pub fn empty(user_id: i32) -> Self {
        Self {
            id: None,
            user_id,
            items: Vec::new(),
            total_quantity: 0,
            subtotal: 0.0,
        }
    }

    pub fn from_parts(cart: CartModel, items: Vec<CartItemDetail>) -> Self {
        let items: Vec<CartItemResponse> = items.into_iter().map(CartItemResponse::from).collect();
        let total_quantity = items.iter().map(|item| i64::from(item.quantity)).sum();
        let subtotal = items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();

        Self {
            id: Some(cart.id),
            user_id: cart.user_id,
            items,
            total_quantity,
            subtotal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i32, price: f64, quantity: i32) -> CartItemDetail {
        CartItemDetail {
            product_id,
            name: format!("Product {product_id}"),
            description: None,
            price,
            image: None,
            stock: 10,
            quantity,
            added_at: None,
        }
    }

    #[test]
    fn totals_are_summed_over_items() {
        let cart = CartModel {
            id: 7,
            user_id: 3,
            created_at: None,
            updated_at: None,
        };

        let response = CartResponse::from_parts(cart, vec![item(1, 10.5, 2), item(2, 4.0, 3)]);

        assert_eq!(response.id, Some(7));
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.total_quantity, 5);
        assert!((response.subtotal - 33.0).abs() < f64::EPSILON);
    }

    #[test]
    fn total_quantity_does_not_wrap_on_large_lines() {
        let cart = CartModel {
            id: 1,
            user_id: 1,
            created_at: None,
            updated_at: None,
        };

        let response =
            CartResponse::from_parts(cart, vec![item(1, 1.0, i32::MAX), item(2, 1.0, 1)]);

        assert_eq!(response.total_quantity, i64::from(i32::MAX) + 1);
    }

    #[test]
    fn empty_cart_serializes_null_id_and_no_items() {
        let json = serde_json::to_value(CartResponse::empty(4)).unwrap();

        assert!(json["id"].is_null());
        assert_eq!(json["user_id"], 4);
        assert_eq!(json["items"].as_array().map(Vec::len), Some(0));
    }
}
