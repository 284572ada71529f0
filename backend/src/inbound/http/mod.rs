//! HTTP inbound adapter exposing the REST endpoints.

pub mod bearer;
pub mod contacts;
pub mod error;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::{ApiError, ApiResult};
