//! HTTP error envelope and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns by translating
//! [`Error`](crate::domain::Error) into Actix responses here. Every error
//! body carries a JSON `detail` message plus a stable `code`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::{TraceId, TRACE_ID_HEADER};

/// Standard error envelope returned by the HTTP adapter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[schema(example = "not_found")]
    code: ErrorCode,
    /// Human-readable failure description.
    #[schema(example = "contact not found")]
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    /// Construct an API error from a domain failure, capturing any ambient
    /// trace identifier.
    #[must_use]
    pub fn from_domain(error: Error) -> Self {
        Self {
            code: error.code(),
            detail: error.message().to_owned(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: error.details().cloned(),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable `detail` message.
    #[must_use]
    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }

    /// Supplementary structured details for clients.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            // Duplicates (username, contact email/phone) answer 400 on
            // the wire; the machine-readable code still says `conflict`.
            ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self::from_domain(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        if matches!(self.code, ErrorCode::InternalError) {
            error!(detail = %self.detail, "internal error surfaced to client");
            let mut redacted = self.clone();
            redacted.detail = "internal server error".to_owned();
            redacted.details = None;
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_bad_request() {
        let api_error = ApiError::from_domain(Error::conflict("username already exists"));
        assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api_error.detail(), "username already exists");
    }

    #[test]
    fn not_found_maps_to_404() {
        let api_error = ApiError::from_domain(Error::not_found("contact not found"));
        assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn envelope_serialises_detail_and_code() {
        let api_error = ApiError::from_domain(Error::unauthorized("invalid token"));
        let value = serde_json::to_value(&api_error).expect("serialise");
        assert_eq!(value.get("detail").and_then(Value::as_str), Some("invalid token"));
        assert_eq!(value.get("code").and_then(Value::as_str), Some("unauthorized"));
    }

    #[test]
    fn internal_errors_are_redacted_in_the_response() {
        let api_error = ApiError::from_domain(Error::internal("pool exhausted on shard 3"));
        let response = api_error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body());
        let bytes = futures_util::future::FutureExt::now_or_never(body)
            .expect("body ready")
            .expect("body bytes");
        let value: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(
            value.get("detail").and_then(Value::as_str),
            Some("internal server error")
        );
    }
}
