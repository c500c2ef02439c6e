//! Item text validation
//!
//! Runs before any store call; the store itself trusts its callers.

use crate::domain::{DomainError, DomainResult};

/// Trim `raw` and check it is non-empty and at most `max_len` characters
pub fn validate_text(raw: &str, max_len: usize) -> DomainResult<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DomainError::InvalidInput("item text must not be empty".to_string()));
    }
    let len = text.chars().count();
    if len > max_len {
        return Err(DomainError::InvalidInput(format!(
            "item text is {} characters, at most {} allowed",
            len, max_len
        )));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_text("  Buy milk \n", 100).unwrap(), "Buy milk");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(matches!(validate_text("", 100), Err(DomainError::InvalidInput(_))));
        assert!(matches!(validate_text("   ", 100), Err(DomainError::InvalidInput(_))));
        assert!(matches!(validate_text("\t\n", 100), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let exact = "é".repeat(100);
        assert!(validate_text(&exact, 100).is_ok());
        assert!(validate_text(&format!("{}é", exact), 100).is_err());
    }

    #[test]
    fn limit_applies_after_trimming() {
        let padded = format!("  {}  ", "x".repeat(100));
        assert_eq!(validate_text(&padded, 100).unwrap().len(), 100);
    }
}
