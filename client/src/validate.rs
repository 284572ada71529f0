//! Client-side form validation.
//!
//! Every field is required and the email must match a loose format
//! regex. A failed validation never reaches the server.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Loose presence-of-@-and-dot check, not full RFC 5322.
        Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("static email regex")
    })
}

/// Validation failures shown inline; nothing is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Invalid email format.")]
    InvalidEmail,
}

/// Check a contact form (create or update) before submission.
pub fn validate_contact_form(name: &str, email: &str, contact: &str) -> Result<(), FormError> {
    if name.trim().is_empty() || email.trim().is_empty() || contact.trim().is_empty() {
        return Err(FormError::MissingFields);
    }
    if !email_regex().is_match(email) {
        return Err(FormError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "a@b.com", "123")]
    #[case("Ada", "", "123")]
    #[case("Ada", "a@b.com", "")]
    #[case("  ", "a@b.com", "123")]
    fn missing_fields_are_rejected(#[case] name: &str, #[case] email: &str, #[case] contact: &str) {
        assert_eq!(
            validate_contact_form(name, email, contact),
            Err(FormError::MissingFields)
        );
    }

    #[rstest]
    #[case("plainaddress")]
    #[case("missing-at.com")]
    #[case("no@dot")]
    #[case("two@@signs.com")]
    fn malformed_emails_are_rejected(#[case] email: &str) {
        assert_eq!(
            validate_contact_form("Ada", email, "123"),
            Err(FormError::InvalidEmail)
        );
    }

    #[rstest]
    #[case("a@b.com")]
    #[case("first.last@sub.example.org")]
    fn valid_forms_pass(#[case] email: &str) {
        assert_eq!(validate_contact_form("Ada", email, "1234567890"), Ok(()));
    }
}
