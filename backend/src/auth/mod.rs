//! Authentication: password hashing, token issue/verify, and the service
//! tying them to the user repository.

pub mod password;
pub mod service;
pub mod token;

pub use self::service::AuthService;
pub use self::token::TokenSigner;
