//! HTTP client for the storefront API, as used by the mobile app.
//!
//! [`ApiClient`] wraps every endpoint the app calls. The `*_or_demo`
//! helpers fall back to built-in sample data so screens still render
//! while the backend is down, and [`LocalCart`] keeps the on-device cart.

pub mod cart;
pub mod client;
pub mod demo;
pub mod error;
pub mod models;

pub use self::cart::{LocalCart, LocalCartItem};
pub use self::client::{ApiClient, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use self::demo::Sourced;
pub use self::error::ClientError;
