//! Session-scoped client state.
//!
//! The bearer token lives in an explicit [`SessionContext`] value that is
//! passed into every flow, rather than in ambient global storage. The
//! context is created once at session start, takes a token on login, and
//! drops it on logout.

/// Explicitly owned session state: the current bearer token, if any.
#[derive(Debug, Default)]
pub struct SessionContext {
    token: Option<String>,
}

impl SessionContext {
    /// Fresh, unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token returned by a successful login.
    pub fn establish(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the token on logout.
    pub fn clear(&mut self) {
        self.token = None;
    }

    /// The current bearer token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a login has taken place this session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_runs_start_login_logout() {
        let mut session = SessionContext::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);

        session.establish("token-123".to_owned());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("token-123"));

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }
}
