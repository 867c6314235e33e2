use crate::{
    client::ApiClient,
    models::{Order, Product},
};
use tracing::warn;

/// A value that came either from the API or from the built-in samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub is_demo: bool,
}

impl<T> Sourced<T> {
    fn live(data: T) -> Self {
        Self {
            data,
            is_demo: false,
        }
    }

    fn demo(data: T) -> Self {
        Self {
            data,
            is_demo: true,
        }
    }
}

const DEMO_IMAGE: &str = "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500&h=500&fit=crop";

pub fn demo_product(id: i32) -> Product {
    Product {
        id,
        name: "Premium Wireless Headphones".to_string(),
        description: Some(
            "Experience superior sound quality with our premium wireless headphones. \
             Featuring active noise cancellation, 30-hour battery life, and comfortable \
             over-ear design perfect for long listening sessions."
                .to_string(),
        ),
        price: 2999.0,
        image: Some(DEMO_IMAGE.to_string()),
        stock: 15,
        created_at: None,
        updated_at: None,
    }
}

/// Sample catalogue shown when the product list is unavailable or empty.
pub fn demo_products() -> Vec<Product> {
    [
        (
            1,
            "Wireless Bluetooth Headphones",
            2999.0,
            "High-quality wireless headphones with noise cancellation",
            "photo-1505740420928-5e560c06d30e",
            15,
        ),
        (
            2,
            "Smart Fitness Watch",
            5999.0,
            "Advanced fitness tracking with heart rate monitor",
            "photo-1523275335684-37898b6baf30",
            8,
        ),
        (
            3,
            "USB-C Fast Charger",
            1299.0,
            "Fast charging adapter with multiple ports",
            "photo-1583394838336-acd977736f90",
            25,
        ),
        (
            4,
            "Wireless Mouse",
            899.0,
            "Ergonomic wireless mouse for comfortable use",
            "photo-1527864550417-7fd91fc51a46",
            30,
        ),
        (
            5,
            "Laptop Backpack",
            2499.0,
            "Durable laptop backpack with multiple compartments",
            "photo-1553062407-98eeb64c6a62",
            12,
        ),
        (
            6,
            "Smartphone Case",
            499.0,
            "Protective case with premium design",
            "photo-1601593346740-925612772716",
            50,
        ),
    ]
    .into_iter()
    .map(|(id, name, price, description, photo, stock)| Product {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        price,
        image: Some(format!(
            "https://images.unsplash.com/{photo}?w=300&h=300&fit=crop"
        )),
        stock,
        created_at: None,
        updated_at: None,
    })
    .collect()
}

pub fn demo_orders(user_id: i32) -> Vec<Order> {
    [
        (1, 199.99, "Delivered", "2024-01-15"),
        (2, 299.99, "Processing", "2024-01-14"),
        (3, 49.99, "Shipped", "2024-01-12"),
    ]
    .into_iter()
    .map(|(id, total_amount, status, date)| Order {
        id,
        user_id,
        total_amount,
        status: status.to_string(),
        address: None,
        created_at: Some(format!("{date} 00:00:00")),
        updated_at: Some(format!("{date} 00:00:00")),
    })
    .collect()
}

impl ApiClient {
    /// Live product list; the sample catalogue when the call fails or finds none.
    pub async fn products_or_demo(&self) -> Sourced<Vec<Product>> {
        match self.get_products().await {
            Ok(products) if !products.is_empty() => Sourced::live(products),
            Ok(_) => Sourced::demo(demo_products()),
            Err(e) => {
                warn!("Falling back to demo products: {e}");
                Sourced::demo(demo_products())
            }
        }
    }

    pub async fn product_or_demo(&self, product_id: i32) -> Sourced<Product> {
        match self.get_product_details(product_id).await {
            Ok(product) => Sourced::live(product),
            Err(e) => {
                warn!("Falling back to demo product {product_id}: {e}");
                Sourced::demo(demo_product(product_id))
            }
        }
    }

    /// Live orders of the user; samples when the call fails or finds none.
    pub async fn orders_or_demo(&self, user_id: i32) -> Sourced<Vec<Order>> {
        match self.get_orders(Some(user_id)).await {
            Ok(orders) if !orders.is_empty() => Sourced::live(orders),
            Ok(_) => Sourced::demo(demo_orders(user_id)),
            Err(e) => {
                warn!("Falling back to demo orders: {e}");
                Sourced::demo(demo_orders(user_id))
            }
        }
    }
}
