//! Bearer-token extraction for protected endpoints.
//!
//! Handlers that take an [`AuthenticatedUser`] parameter only run after
//! the `Authorization: Bearer <token>` header has been verified; a
//! missing or invalid token short-circuits with `401 Unauthorized`
//! before any storage is touched.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::{Error, Username};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// The verified subject of the request's bearer token.
///
/// The username proves prior authentication only; contacts are a single
/// global list and nothing scopes them to this user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Username);

fn verify_request(req: &HttpRequest) -> Result<Username, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state not configured"))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;

    state.auth.verify(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            verify_request(req)
                .map(AuthenticatedUser)
                .map_err(ApiError::from),
        )
    }
}
