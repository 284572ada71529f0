//! HTTP client for the contact book API.
//!
//! One method per endpoint; failures carry the server's `detail` message
//! verbatim when the body provides one, otherwise a generic description.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::SessionContext;

/// A contact as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ContactBody<'a> {
    name: &'a str,
    email: &'a str,
    contact: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DetailBody {
    detail: String,
}

/// Failures surfaced to the UI.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with an error status.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    /// Tried to call a protected endpoint without logging in first.
    #[error("not logged in")]
    NotLoggedIn,
}

/// Thin wrapper over `reqwest` holding the base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URL (trailing slash tolerated).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer<'a>(session: &'a SessionContext) -> Result<&'a str, ApiError> {
        session.token().ok_or(ApiError::NotLoggedIn)
    }

    /// `POST /register`; returns the server's success `detail`.
    pub async fn register(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(&CredentialsBody { username, password })
            .send()
            .await?;
        let body: DetailBody = parse(response).await?;
        Ok(body.detail)
    }

    /// `POST /login`; returns the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&CredentialsBody { username, password })
            .send()
            .await?;
        let body: TokenBody = parse(response).await?;
        Ok(body.access_token)
    }

    /// `GET /contacts/`.
    pub async fn list_contacts(&self, session: &SessionContext) -> Result<Vec<Contact>, ApiError> {
        let response = self
            .http
            .get(self.url("/contacts/"))
            .bearer_auth(Self::bearer(session)?)
            .send()
            .await?;
        parse(response).await
    }

    /// `POST /contacts/`.
    pub async fn create_contact(
        &self,
        session: &SessionContext,
        name: &str,
        email: &str,
        contact: &str,
    ) -> Result<Contact, ApiError> {
        let response = self
            .http
            .post(self.url("/contacts/"))
            .bearer_auth(Self::bearer(session)?)
            .json(&ContactBody {
                name,
                email,
                contact,
            })
            .send()
            .await?;
        parse(response).await
    }

    /// `PUT /contacts/{id}` — full-field replace.
    pub async fn update_contact(
        &self,
        session: &SessionContext,
        id: i32,
        name: &str,
        email: &str,
        contact: &str,
    ) -> Result<Contact, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/contacts/{id}")))
            .bearer_auth(Self::bearer(session)?)
            .json(&ContactBody {
                name,
                email,
                contact,
            })
            .send()
            .await?;
        parse(response).await
    }

    /// `DELETE /contacts/{id}`; returns the server's success `detail`.
    pub async fn delete_contact(
        &self,
        session: &SessionContext,
        id: i32,
    ) -> Result<String, ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/contacts/{id}")))
            .bearer_auth(Self::bearer(session)?)
            .send()
            .await?;
        let body: DetailBody = parse(response).await?;
        Ok(body.detail)
    }
}

/// Decode a success body, or turn an error status into [`ApiError::Api`]
/// carrying the server's `detail` when one is present.
async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let detail = match response.json::<DetailBody>().await {
        Ok(body) => body.detail,
        Err(_) => format!("server answered {status}"),
    };
    Err(ApiError::Api {
        status: status.as_u16(),
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/contacts/"), "http://localhost:8000/contacts/");
    }

    #[test]
    fn bearer_requires_a_login() {
        let session = SessionContext::new();
        assert!(matches!(
            ApiClient::bearer(&session),
            Err(ApiError::NotLoggedIn)
        ));
    }
}
