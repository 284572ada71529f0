//! User account model.
//!
//! Accounts exist only to gate contact mutations behind a bearer token:
//! they are created once via registration, read during login, and never
//! updated or deleted.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum stored length for a username, mirroring the column limit.
pub const USERNAME_MAX: usize = 50;

/// Validation errors returned by [`Username::new`] and
/// [`Credentials::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Unique account name, non-empty and at most [`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, CredentialValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CredentialValidationError::EmptyUsername);
        }
        if raw.chars().count() > USERNAME_MAX {
            return Err(CredentialValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = CredentialValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored user account. The `password_hash` field always holds an argon2
/// PHC string, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: Username,
    pub password_hash: String,
}

/// Login or registration credentials as submitted by the client.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: Username,
    password: String,
}

impl Credentials {
    /// Validate both parts and construct the pair.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: password.to_owned(),
        })
    }

    /// The validated account name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// The plaintext password; only ever fed to the hasher or verifier.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
