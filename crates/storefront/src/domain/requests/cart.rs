use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Most units a single cart line may hold.
pub const MAX_LINE_QUANTITY: i32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddToCartRequest {
    #[validate(range(min = 1, message = "user_id must be a positive id"))]
    #[serde(alias = "userId")]
    pub user_id: i32,

    #[validate(range(min = 1, message = "product_id must be a positive id"))]
    #[serde(alias = "productId")]
    pub product_id: i32,

    #[validate(range(
        min = 1,
        max = MAX_LINE_QUANTITY,
        message = "quantity must be between 1 and 10000"
    ))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_defaults_to_one_and_accepts_camel_case() {
        let req: AddToCartRequest =
            serde_json::from_str(r#"{"userId": 3, "productId": 9}"#).unwrap();

        assert_eq!(req.user_id, 3);
        assert_eq!(req.product_id, 9);
        assert_eq!(req.quantity, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn zero_quantity_fails_validation() {
        let req = AddToCartRequest {
            user_id: 1,
            product_id: 1,
            quantity: 0,
        };

        let errors = req.validate().unwrap_err();
        let messages = crate::domain::requests::validation_messages(&errors);
        assert_eq!(
            messages,
            vec!["quantity: quantity must be between 1 and 10000".to_string()]
        );
    }

    #[test]
    fn quantity_above_line_limit_fails_validation() {
        let req = AddToCartRequest {
            user_id: 1,
            product_id: 1,
            quantity: i32::MAX,
        };

        assert!(req.validate().is_err());

        let at_limit = AddToCartRequest {
            quantity: MAX_LINE_QUANTITY,
            ..req
        };
        assert!(at_limit.validate().is_ok());
    }
}
