pub mod cart;
pub mod order;
pub mod product;
pub mod user;

/// Flattens `validator` errors into `field: message` strings.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid {field}"));
                format!("{field}: {message}")
            })
        })
        .collect();
    messages.sort();
    messages
}
