mod cart;
mod order;
mod product;
mod user;

pub use self::cart::{Cart, CartItemDetail};
pub use self::order::{Order, OrderRow, STATUS_PLACED};
pub use self::product::{Product, ProductRow};
pub use self::user::{User, UserRow};
