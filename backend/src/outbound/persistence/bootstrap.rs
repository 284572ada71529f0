//! Idempotent schema creation.
//!
//! There is no migrations engine: the two tables are created with
//! `CREATE TABLE IF NOT EXISTS` every time the server starts. The
//! statements must stay in lockstep with [`schema`](super::schema).

use diesel::sql_query;
use diesel_async::RunQueryDsl;
use tracing::info;

use super::pool::{checkout, DbPool, PoolError};

const CREATE_USERS: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL
)";

const CREATE_CONTACTS: &str = "\
CREATE TABLE IF NOT EXISTS contacts (
    id SERIAL PRIMARY KEY,
    name VARCHAR(200) NOT NULL,
    email VARCHAR(120) NOT NULL UNIQUE,
    contact VARCHAR(12) NOT NULL UNIQUE
)";

/// Errors raised while creating the schema at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaBootstrapError {
    /// The pool could not provide a connection.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// A DDL statement failed.
    #[error("schema creation failed: {message}")]
    Execution { message: String },
}

/// Create both tables if they do not already exist.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), SchemaBootstrapError> {
    let mut conn = checkout(pool).await?;
    for statement in [CREATE_USERS, CREATE_CONTACTS] {
        sql_query(statement)
            .execute(&mut conn)
            .await
            .map_err(|error| SchemaBootstrapError::Execution {
                message: error.to_string(),
            })?;
    }
    info!("schema ensured");
    Ok(())
}
