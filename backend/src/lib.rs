//! Contact book backend library modules.

pub mod auth;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
