//! Registration and login handlers.
//!
//! ```text
//! POST /register {"username":"ada","password":"secret"}
//! POST /login    {"username":"ada","password":"secret"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Credentials, CredentialValidationError, Error};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body shared by `POST /register` and `POST /login`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = CredentialValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Success envelope carrying a `detail` message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub(crate) fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Login response: the bearer string plus its type tag. Key names are
/// part of the data contract and stay snake_case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User registered", body = DetailResponse),
        (status = 400, description = "Invalid request or username already exists", body = crate::inbound::http::error::ApiError),
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<DetailResponse>> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credential_validation_error)?;
    state.auth.register(&credentials).await?;
    Ok(web::Json(DetailResponse::new("User registered successfully")))
}

/// Authenticate and issue a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::error::ApiError),
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credential_validation_error)?;
    let access_token = state.auth.login(&credentials).await?;
    Ok(web::Json(TokenResponse {
        access_token,
        token_type: "bearer".to_owned(),
    }))
}

fn map_credential_validation_error(err: CredentialValidationError) -> Error {
    let field = match err {
        CredentialValidationError::EmptyUsername
        | CredentialValidationError::UsernameTooLong { .. } => "username",
        CredentialValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::{read_json, test_app};

    #[actix_web::test]
    async fn register_then_login_round_trips_a_verifiable_token() {
        let app = actix_test::init_service(test_app()).await;

        let register_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_json(CredentialsRequest {
                    username: "ada".into(),
                    password: "secret".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(register_res.status(), StatusCode::OK);
        let body: Value = read_json(register_res).await;
        assert_eq!(
            body.get("detail").and_then(Value::as_str),
            Some("User registered successfully")
        );

        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(CredentialsRequest {
                    username: "ada".into(),
                    password: "secret".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let body: Value = read_json(login_res).await;
        assert_eq!(body.get("token_type").and_then(Value::as_str), Some("bearer"));
        assert!(body
            .get("access_token")
            .and_then(Value::as_str)
            .is_some_and(|token| !token.is_empty()));
    }

    #[actix_web::test]
    async fn duplicate_username_answers_400_with_conflict_code() {
        let app = actix_test::init_service(test_app()).await;
        for _ in 0..2 {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/register")
                    .set_json(CredentialsRequest {
                        username: "ada".into(),
                        password: "secret".into(),
                    })
                    .to_request(),
            )
            .await;
            if res.status() == StatusCode::OK {
                continue;
            }
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            let body: Value = read_json(res).await;
            assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
            assert_eq!(
                body.get("detail").and_then(Value::as_str),
                Some("username already exists")
            );
            return;
        }
        panic!("second registration unexpectedly succeeded");
    }

    #[actix_web::test]
    async fn wrong_password_answers_401() {
        let app = actix_test::init_service(test_app()).await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_json(CredentialsRequest {
                    username: "ada".into(),
                    password: "secret".into(),
                })
                .to_request(),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(CredentialsRequest {
                    username: "ada".into(),
                    password: "wrong".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = read_json(res).await;
        assert_eq!(
            body.get("detail").and_then(Value::as_str),
            Some("invalid credentials")
        );
    }

    #[actix_web::test]
    async fn blank_username_is_an_invalid_request() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(CredentialsRequest {
                    username: "   ".into(),
                    password: "secret".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_json(res).await;
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        assert_eq!(
            body.pointer("/details/field").and_then(Value::as_str),
            Some("username")
        );
    }
}
