//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the statements in
//! [`bootstrap`](super::bootstrap) exactly; they give Diesel compile-time
//! query validation and type-safe SQL generation.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key, assigned by storage on insert.
        id -> Int4,
        /// Unique account name (max 50 characters).
        #[max_length = 50]
        username -> Varchar,
        /// argon2 PHC hash of the password, never the plaintext.
        #[max_length = 255]
        password -> Varchar,
    }
}

diesel::table! {
    /// The single global list of contact records.
    contacts (id) {
        /// Primary key, assigned by storage on insert.
        id -> Int4,
        /// Contact name (max 200 characters).
        #[max_length = 200]
        name -> Varchar,
        /// Unique email address (max 120 characters).
        #[max_length = 120]
        email -> Varchar,
        /// Unique phone number (max 12 characters); the column is named
        /// `contact` to match the wire key.
        #[max_length = 12]
        contact -> Varchar,
    }
}
