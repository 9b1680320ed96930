//! Field validation for course entities.
//!
//! Every function returns `Ok(())` when the value is acceptable, or a
//! [`CoreError::Validation`] naming the field and the violated rule.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateUrl;

use crate::error::CoreError;
use crate::ordering::Order;

/// Maximum length of subject, course and module titles.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of content item titles.
pub const MAX_ITEM_TITLE_LEN: usize = 250;

/// Maximum length of subject and course slugs.
pub const MAX_SLUG_LEN: usize = 200;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid regex"));

/// Validate a required, length-limited title.
pub fn validate_title(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Validate a URL slug: lowercase letters, digits, `-` and `_`.
pub fn validate_slug(value: &str) -> Result<(), CoreError> {
    if value.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !SLUG_RE.is_match(value) {
        return Err(CoreError::Validation(format!(
            "slug '{value}' may only contain lowercase letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

/// Validate an absolute URL (video items).
pub fn validate_url(value: &str) -> Result<(), CoreError> {
    if value.validate_url() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("'{value}' is not a valid URL")))
    }
}

/// Validate a manually supplied order.
pub fn validate_order(order: Order) -> Result<(), CoreError> {
    if order < 0 {
        return Err(CoreError::Validation(format!(
            "order must be non-negative, got {order}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn title_accepts_normal_text() {
        assert!(validate_title("title", "Rust for Pythonistas", MAX_TITLE_LEN).is_ok());
    }

    #[test]
    fn title_rejects_blank() {
        assert_matches!(
            validate_title("title", "   ", MAX_TITLE_LEN),
            Err(CoreError::Validation(msg)) if msg.contains("must not be empty")
        );
    }

    #[test]
    fn title_length_counts_characters() {
        let at_limit = "é".repeat(MAX_TITLE_LEN);
        assert!(validate_title("title", &at_limit, MAX_TITLE_LEN).is_ok());
        let over = "a".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_title("title", &over, MAX_TITLE_LEN).is_err());
    }

    #[test]
    fn slugs() {
        assert!(validate_slug("intro-to-rust").is_ok());
        assert!(validate_slug("week_1").is_ok());
        assert!(validate_slug("Intro").is_err());
        assert!(validate_slug("a b").is_err());
        assert!(validate_slug("").is_err());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LEN)).is_ok());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LEN + 1)).is_err());
    }

    #[test]
    fn slug_separators_may_lead_trail_or_repeat() {
        for slug in ["-leading", "trailing-", "a--b", "_x", "a-_b"] {
            assert!(validate_slug(slug).is_ok(), "{slug} should be a valid slug");
        }
    }

    #[test]
    fn urls() {
        assert!(validate_url("https://videos.example.com/watch?v=42").is_ok());
        assert!(validate_url("not a url").is_err());
    }

    #[test]
    fn orders() {
        assert!(validate_order(0).is_ok());
        assert!(validate_order(10).is_ok());
        assert!(validate_order(-1).is_err());
    }
}
