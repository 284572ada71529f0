//! Password hashing with argon2.
//!
//! Hashes are stored as PHC strings (`$argon2id$...`), so the salt and
//! parameters travel with the hash and verification needs no extra state.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::domain::Error;

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| Error::internal(format!("password hashing failed: {error}")))
}

/// Check a plaintext password against a stored PHC string.
///
/// An unparseable stored hash counts as a mismatch rather than an error:
/// login must answer `Unauthorized`, not surface storage corruption.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("stored password hash failed to parse");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
