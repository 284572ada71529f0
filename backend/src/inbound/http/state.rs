//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on the auth service and domain ports and remain testable
//! without I/O.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::domain::ports::ContactRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<AuthService>,
    pub contacts: Arc<dyn ContactRepository>,
}

impl HttpState {
    /// Bundle the auth service and contact repository for handlers.
    pub fn new(auth: Arc<AuthService>, contacts: Arc<dyn ContactRepository>) -> Self {
        Self { auth, contacts }
    }
}
