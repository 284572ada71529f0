//! Signed access tokens.
//!
//! Tokens are HS256 JWTs carrying `sub` (the username), `iat`, and `exp`.
//! The algorithm and secret are deployment configuration, not part of the
//! data contract; clients treat the token as an opaque bearer string.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Username};

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated username.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues and validates access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl TokenSigner {
    /// Create a signer from the deployment secret and token lifetime.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Zero leeway: an expired token is rejected immediately.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            validation,
        }
    }

    /// Issue a token for the given username, expiring after the configured
    /// lifetime.
    pub fn issue(&self, username: &Username) -> Result<String, Error> {
        self.issue_with_lifetime(username, self.ttl)
    }

    fn issue_with_lifetime(&self, username: &Username, ttl: Duration) -> Result<String, Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|error| Error::internal(format!("token signing failed: {error}")))
    }

    /// Validate signature and expiry, returning the embedded username.
    ///
    /// Any decode, signature, or expiry failure answers `Unauthorized`;
    /// so does a subject that no longer parses as a username.
    pub fn verify(&self, token: &str) -> Result<Username, Error> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| Error::unauthorized("invalid token"))?;
        Username::new(data.claims.sub).map_err(|_| Error::unauthorized("invalid token"))
    }

    #[cfg(test)]
    pub(crate) fn issue_expired(&self, username: &Username) -> Result<String, Error> {
        self.issue_with_lifetime(username, Duration::minutes(-5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret", Duration::minutes(30))
    }

    fn username() -> Username {
        Username::new("ada").expect("valid username")
    }

    #[test]
    fn issued_token_round_trips_subject() {
        let signer = signer();
        let token = signer.issue(&username()).expect("issue");
        let subject = signer.verify(&token).expect("verify");
        assert_eq!(subject.as_str(), "ada");
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = signer();
        let token = signer.issue_expired(&username()).expect("issue");
        let error = signer.verify(&token).expect_err("expired");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn forged_signature_is_rejected() {
        let token = TokenSigner::new("other-secret", Duration::minutes(30))
            .issue(&username())
            .expect("issue");
        let error = signer().verify(&token).expect_err("forged");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn token_without_subject_is_rejected() {
        // Hand-rolled claims without `sub`, signed with the right secret.
        #[derive(Serialize)]
        struct NoSubject {
            iat: i64,
            exp: i64,
        }
        let now = Utc::now().timestamp();
        let token = encode(
            &Header::default(),
            &NoSubject {
                iat: now,
                exp: now + 600,
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");

        let error = signer().verify(&token).expect_err("no subject");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let error = signer().verify("not-a-jwt").expect_err("garbage");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
