//! Submission-time shape checks for contact fields.
//!
//! Both checks are deliberately permissive: they catch obvious typos, not
//! every malformed address. Neither touches form state.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One `@`, at least one `.` after it, no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// Optional leading `+`, then ten or more digits, spaces or dashes.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s-]{10,}$").expect("Invalid phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Phone is optional, so an empty value passes.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.is_empty() || PHONE_PATTERN.is_match(phone)
}

/// The field a rejected submission moves focus to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    Email,
    Phone,
}

/// A blocking reason to refuse a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number with at least 10 digits")]
    InvalidPhone,
}

impl ValidationFailure {
    pub fn focus(&self) -> FocusTarget {
        match self {
            ValidationFailure::InvalidEmail => FocusTarget::Email,
            ValidationFailure::InvalidPhone => FocusTarget::Phone,
        }
    }
}

/// Runs the submission gate in order: email first, then phone.
pub fn validate_contact(email: &str, phone: &str) -> Result<(), ValidationFailure> {
    if !is_valid_email(email) {
        return Err(ValidationFailure::InvalidEmail);
    }
    if !is_valid_phone(phone) {
        return Err(ValidationFailure::InvalidPhone);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_minimal_valid() {
        assert!(is_valid_email("a@b.co"));
    }

    #[test]
    fn test_email_multiple_dots_in_domain() {
        assert!(is_valid_email("jane.doe@mail.example.org"));
    }

    #[test]
    fn test_email_without_dot_after_at() {
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn test_email_empty() {
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_double_at() {
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_email_with_space() {
        assert!(!is_valid_email("jane doe@x.com"));
        assert!(!is_valid_email(" jane@x.com"));
    }

    #[test]
    fn test_email_trailing_dot_only() {
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn test_email_no_local_part() {
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn test_phone_empty_is_optional() {
        assert!(is_valid_phone(""));
    }

    #[test]
    fn test_phone_too_short() {
        assert!(!is_valid_phone("123"));
    }

    #[test]
    fn test_phone_international_format() {
        assert!(is_valid_phone("+1 555-123-4567"));
    }

    #[test]
    fn test_phone_exactly_ten_digits() {
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("555123456"));
    }

    #[test]
    fn test_phone_rejects_letters_and_parens() {
        assert!(!is_valid_phone("555-CALL-NOW"));
        assert!(!is_valid_phone("(555) 123-4567"));
    }

    #[test]
    fn test_phone_plus_only_at_start() {
        assert!(!is_valid_phone("1+555 123 4567"));
    }

    #[test]
    fn test_validate_contact_email_checked_first() {
        assert_eq!(
            validate_contact("bad-email", "123"),
            Err(ValidationFailure::InvalidEmail)
        );
    }

    #[test]
    fn test_validate_contact_phone_failure_focus() {
        let err = validate_contact("jane@x.com", "123").unwrap_err();
        assert_eq!(err, ValidationFailure::InvalidPhone);
        assert_eq!(err.focus(), FocusTarget::Phone);
    }

    #[test]
    fn test_validate_contact_passes() {
        assert!(validate_contact("jane@x.com", "").is_ok());
    }
}
