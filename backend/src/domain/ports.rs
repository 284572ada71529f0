//! Domain ports for driven adapters.
//!
//! Ports describe how the domain expects to interact with persistence.
//! Each trait exposes strongly typed errors so adapters map their
//! failures into predictable variants instead of returning
//! `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::{Contact, ContactDraft, User, Username};

/// Errors surfaced by the user persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Database connectivity or pool checkout failures.
    #[error("user persistence connection failed: {message}")]
    Connection { message: String },
    /// The username collides with an existing account.
    #[error("username already exists")]
    DuplicateUsername,
    /// Catch-all for query failures that bubble up from the adapter.
    #[error("user persistence query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query related adapter errors.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Store of registered accounts.
///
/// Accounts are write-once: there is deliberately no update or delete.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up an account by its unique username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new account, failing with
    /// [`UserPersistenceError::DuplicateUsername`] when the name is taken.
    async fn insert(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, UserPersistenceError>;
}

/// Errors surfaced by the contact persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactPersistenceError {
    /// Database connectivity or pool checkout failures.
    #[error("contact persistence connection failed: {message}")]
    Connection { message: String },
    /// A unique column collided with an existing row.
    #[error("duplicate contact {field}")]
    Duplicate { field: DuplicateContactField },
    /// Catch-all for query failures that bubble up from the adapter.
    #[error("contact persistence query failed: {message}")]
    Query { message: String },
}

/// Which unique contact column collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateContactField {
    Email,
    Phone,
}

impl std::fmt::Display for DuplicateContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Phone => f.write_str("phone"),
        }
    }
}

impl ContactPersistenceError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query related adapter errors.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-column collisions.
    #[must_use]
    pub fn duplicate(field: DuplicateContactField) -> Self {
        Self::Duplicate { field }
    }
}

/// Store of contact records: one global list, storage-native order.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Fetch every contact, unpaginated, in storage order.
    async fn list(&self) -> Result<Vec<Contact>, ContactPersistenceError>;

    /// Insert a new contact and return it with its storage-assigned id.
    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactPersistenceError>;

    /// Replace all fields of the contact with the given id. Returns
    /// `Ok(None)` when no such row exists.
    async fn update(
        &self,
        id: i32,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactPersistenceError>;

    /// Delete the contact with the given id. Returns `Ok(false)` when no
    /// such row exists.
    async fn delete(&self, id: i32) -> Result<bool, ContactPersistenceError>;
}
