//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::{checkout, DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::DuplicateUsername
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row.into_domain()
        .map_err(|error| UserPersistenceError::query(format!("stored user invalid: {error}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = checkout(&self.pool).await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn insert(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = checkout(&self.pool).await.map_err(map_pool_error)?;
        let row = diesel::insert_into(users::table)
            .values(&NewUserRow {
                username: username.as_str(),
                password: password_hash,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_user(row)
    }
}
