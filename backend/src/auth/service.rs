//! Registration, login, and token verification over the user repository
//! port.
//!
//! The service owns the hashing and signing primitives; handlers only see
//! domain errors. The username a token yields is used purely as a
//! presence-of-auth check: contacts are a single global list and are not
//! scoped to the caller.

use std::sync::Arc;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Credentials, Error, Username};

use super::password::{hash_password, verify_password};
use super::token::TokenSigner;

/// Authentication service backed by a [`UserRepository`].
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenSigner,
}

impl AuthService {
    /// Create a service over the given repository and token signer.
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenSigner) -> Self {
        Self { users, tokens }
    }

    /// Store a new account with a salted hash of the password.
    ///
    /// Fails with `Conflict` when the username is already taken; the
    /// existing account is left untouched.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), Error> {
        let password_hash = hash_password(credentials.password())?;
        self.users
            .insert(credentials.username(), &password_hash)
            .await
            .map(|_| ())
            .map_err(map_user_persistence_error)
    }

    /// Check credentials and issue a signed access token.
    ///
    /// An unknown username and a wrong password are indistinguishable to
    /// the caller: both answer `Unauthorized`.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, Error> {
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        if !verify_password(credentials.password(), &user.password_hash) {
            return Err(Error::unauthorized("invalid credentials"));
        }

        self.tokens.issue(&user.username)
    }

    /// Validate a bearer token and return the embedded username.
    pub fn verify(&self, token: &str) -> Result<Username, Error> {
        self.tokens.verify(token)
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername => Error::conflict("username already exists"),
        UserPersistenceError::Connection { message } | UserPersistenceError::Query { message } => {
            Error::internal(message)
        }
    }
}
