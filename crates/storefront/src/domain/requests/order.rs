use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllOrders {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Only orders of this user.
    pub user_id: Option<i32>,
}

impl Default for FindAllOrders {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            user_id: None,
        }
    }
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "user_id must be a positive id"))]
    #[serde(alias = "userId")]
    pub user_id: i32,

    #[validate(range(min = 0.0, message = "total_amount cannot be negative"))]
    #[serde(alias = "totalAmount")]
    #[schema(example = 5998.0)]
    pub total_amount: f64,

    #[schema(example = "221B Baker Street, London")]
    pub address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderRecord {
    pub user_id: i32,
    pub total_amount: f64,
    pub status: String,
    pub address: Option<String>,
}
