//! Server construction and wiring.
//!
//! Builds the connection pool, ensures the schema, assembles the HTTP
//! state from Diesel-backed adapters, and runs the actix server.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use utoipa::OpenApi;

use crate::auth::{AuthService, TokenSigner};
use crate::doc::ApiDoc;
use crate::inbound::http::contacts::{
    create_contact, delete_contact, list_contacts, update_contact,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{login, register};
use crate::middleware::Trace;
use crate::outbound::persistence::{
    ensure_schema, DbPool, DieselContactRepository, DieselUserRepository, PoolConfig,
};

/// Assemble handler state over Diesel-backed adapters.
pub fn build_state(config: &AppConfig, pool: DbPool) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let signer = TokenSigner::new(&config.jwt_secret, config.token_ttl);
    let auth = Arc::new(AuthService::new(users, signer));
    let contacts = Arc::new(DieselContactRepository::new(pool));
    web::Data::new(HttpState::new(auth, contacts))
}

async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

/// Run the server to completion.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let pool = PoolConfig::new(&config.database_url)
        .build()
        .await
        .map_err(std::io::Error::other)?;
    ensure_schema(&pool).await.map_err(std::io::Error::other)?;

    let state = build_state(&config, pool);
    let bind_addr = config.bind_addr;
    info!(%bind_addr, "starting contact book API");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            // Browser clients may be served from any origin.
            .wrap(Cors::permissive())
            .service(register)
            .service(login)
            .service(list_contacts)
            .service(create_contact)
            .service(update_contact)
            .service(delete_contact)
            .route("/api-docs/openapi.json", web::get().to(openapi_json))
    })
    .bind(bind_addr)?
    .run()
    .await
}
