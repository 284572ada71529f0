//! Domain primitives and ports.
//!
//! Purpose: define strongly typed entities shared by the HTTP and
//! persistence layers, and the ports those layers communicate through.
//! Types are immutable; invariants live in each type's Rustdoc.

pub mod contact;
pub mod error;
pub mod ports;
pub mod user;

pub use self::contact::{Contact, ContactDraft, ContactValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::user::{Credentials, CredentialValidationError, User, Username};
