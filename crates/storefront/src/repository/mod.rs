pub mod cart;
pub mod order;
pub mod product;
pub mod user;

/// Turns a free-text search into an `ILIKE` operand matched literally.
pub(crate) fn search_pattern(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Some(escaped)
}

#[cfg(test)]
mod tests {
    use super::search_pattern;

    #[test]
    fn blank_search_is_no_filter() {
        assert_eq!(search_pattern("   "), None);
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(search_pattern(" 100%_off ").as_deref(), Some("100\\%\\_off"));
        assert_eq!(search_pattern("a\\b").as_deref(), Some("a\\\\b"));
    }
}
