use crate::models::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct LocalCartItem {
    pub product: Product,
    pub quantity: i32,
}

/// On-device cart, kept alongside the server cart.
#[derive(Debug, Clone, Default)]
pub struct LocalCart {
    items: Vec<LocalCartItem>,
}

impl LocalCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LocalCartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` of the product, merging with an existing line.
    pub fn add_item(&mut self, product: Product, quantity: i32) {
        if quantity < 1 {
            return;
        }

        match self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(LocalCartItem { product, quantity }),
        }
    }

    /// Drops the whole line; returns whether it was there.
    pub fn remove_item(&mut self, product_id: i32) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.product.price * f64::from(item.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_product;

    #[test]
    fn adding_same_product_merges_quantity() {
        let mut cart = LocalCart::new();
        cart.add_item(demo_product(1), 1);
        cart.add_item(demo_product(1), 2);
        cart.add_item(demo_product(2), 1);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total_quantity(), 4);
        assert_eq!(cart.subtotal(), 2999.0 * 4.0);
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = LocalCart::new();
        cart.add_item(demo_product(1), 1);
        cart.add_item(demo_product(2), 0);

        assert_eq!(cart.items().len(), 1);
        assert!(!cart.remove_item(9));
        assert!(cart.remove_item(1));
        assert!(cart.is_empty());

        cart.add_item(demo_product(3), 5);
        cart.clear();
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn huge_quantities_do_not_wrap() {
        let mut cart = LocalCart::new();
        cart.add_item(demo_product(1), i32::MAX);
        cart.add_item(demo_product(1), 5);
        cart.add_item(demo_product(2), i32::MAX);

        assert_eq!(cart.items()[0].quantity, i32::MAX);
        assert_eq!(cart.total_quantity(), 2 * i64::from(i32::MAX));
    }
}
