use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: String::new(),
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
pub struct CreateProductRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name is required"),
        custom(function = "not_blank", message = "Name is required")
    )]
    #[schema(example = "Premium Wireless Headphones")]
    pub name: String,

    pub description: Option<String>,

    #[validate(
        custom(function = "finite", message = "Price must be a finite number"),
        range(min = 0.0, message = "Price cannot be negative")
    )]
    #[schema(example = 2999.0)]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[serde(default)]
    #[schema(example = 15)]
    pub stock: i32,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// NaN slips through range checks
fn finite(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new("finite"));
    }
    Ok(())
}

/// Multipart form accepted by `POST /api/products`, for the API docs.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateProductForm {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: Option<i32>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

/// An uploaded product image, still in memory.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Row values for a new product, with the image already stored.
#[derive(Debug, Clone)]
pub struct CreateProductRecord {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, price: f64) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            description: None,
            price,
            stock: 0,
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let errors = request("   ", 10.0).validate().unwrap_err();

        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn non_finite_prices_are_rejected() {
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let errors = request("Mug", price).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("price"), "{price}");
        }

        assert!(request("Mug", 0.0).validate().is_ok());
    }
}
