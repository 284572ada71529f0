//! Contact record model.
//!
//! A contact is the managed record type: a person's name, email address,
//! and phone number. Contacts form a single global list; there is no
//! per-user ownership. Field newtypes enforce presence and the storage
//! column limits. Email *format* is deliberately not checked here:
//! format validation happens client-side only.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum stored length for a contact name.
pub const NAME_MAX: usize = 200;
/// Maximum stored length for a contact email address.
pub const EMAIL_MAX: usize = 120;
/// Maximum stored length for a contact phone number.
pub const PHONE_MAX: usize = 12;

/// Validation errors returned by the field constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("contact number must not be empty")]
    EmptyPhone,
    #[error("contact number must be at most {max} characters")]
    PhoneTooLong { max: usize },
}

macro_rules! contact_field {
    ($name:ident, $max:expr, $empty:ident, $too_long:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the field.
            pub fn new(value: impl Into<String>) -> Result<Self, ContactValidationError> {
                let raw = value.into();
                if raw.trim().is_empty() {
                    return Err(ContactValidationError::$empty);
                }
                if raw.chars().count() > $max {
                    return Err(ContactValidationError::$too_long { max: $max });
                }
                Ok(Self(raw))
            }

            /// Borrow the underlying value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ContactValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

contact_field!(ContactName, NAME_MAX, EmptyName, NameTooLong);
contact_field!(ContactEmail, EMAIL_MAX, EmptyEmail, EmailTooLong);
contact_field!(ContactPhone, PHONE_MAX, EmptyPhone, PhoneTooLong);

/// The mutable fields of a contact, validated but not yet persisted.
///
/// Used both for creation and for the full-field replace performed by
/// update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: ContactPhone,
}

impl ContactDraft {
    /// Validate all three fields and construct the draft.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, ContactValidationError> {
        Ok(Self {
            name: ContactName::new(name)?,
            email: ContactEmail::new(email)?,
            phone: ContactPhone::new(phone)?,
        })
    }
}

/// A persisted contact with its storage-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: i32,
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: ContactPhone,
}

impl Contact {
    /// Pair a draft with its storage-assigned id.
    #[must_use]
    pub fn from_draft(id: i32, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "a@b.com", "12345", ContactValidationError::EmptyName)]
    #[case("Ada", "", "12345", ContactValidationError::EmptyEmail)]
    #[case("Ada", "a@b.com", "", ContactValidationError::EmptyPhone)]
    #[case("Ada", "a@b.com", "  ", ContactValidationError::EmptyPhone)]
    fn draft_rejects_missing_fields(
        #[case] name: &str,
        #[case] email: &str,
        #[case] phone: &str,
        #[case] expected: ContactValidationError,
    ) {
        assert_eq!(
            ContactDraft::try_from_parts(name, email, phone).expect_err("invalid draft"),
            expected
        );
    }

    #[test]
    fn draft_rejects_over_length_fields() {
        let long_name = "n".repeat(NAME_MAX + 1);
        assert_eq!(
            ContactDraft::try_from_parts(&long_name, "a@b.com", "12345").expect_err("name"),
            ContactValidationError::NameTooLong { max: NAME_MAX }
        );

        let long_phone = "1".repeat(PHONE_MAX + 1);
        assert_eq!(
            ContactDraft::try_from_parts("Ada", "a@b.com", &long_phone).expect_err("phone"),
            ContactValidationError::PhoneTooLong { max: PHONE_MAX }
        );
    }

    #[test]
    fn draft_accepts_storage_limit_lengths() {
        let name = "n".repeat(NAME_MAX);
        let phone = "1".repeat(PHONE_MAX);
        let draft = ContactDraft::try_from_parts(&name, "a@b.com", &phone).expect("valid draft");
        assert_eq!(draft.name.as_str().len(), NAME_MAX);
        assert_eq!(draft.phone.as_str().len(), PHONE_MAX);
    }

    #[test]
    fn contact_pairs_draft_with_id() {
        let draft = ContactDraft::try_from_parts("Ada", "a@b.com", "1234567890").expect("draft");
        let contact = Contact::from_draft(7, draft);
        assert_eq!(contact.id, 7);
        assert_eq!(contact.email.as_str(), "a@b.com");
    }
}
