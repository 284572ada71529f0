//! PostgreSQL-backed `ContactRepository` implementation using Diesel.
//!
//! Unique violations on the email and phone columns are mapped to typed
//! duplicate errors here, so the HTTP layer can answer with a `Conflict`
//! instead of letting the constraint surface as an opaque 500.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ContactPersistenceError, ContactRepository, DuplicateContactField};
use crate::domain::{Contact, ContactDraft};

use super::models::{ContactRow, ContactWriteRow};
use super::pool::{checkout, DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactPersistenceError {
    ContactPersistenceError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> ContactPersistenceError {
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
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            // The bootstrap DDL names the constraints contacts_email_key
            // and contacts_contact_key.
            let field = match info.constraint_name() {
                Some(name) if name.contains("email") => DuplicateContactField::Email,
                Some(_) => DuplicateContactField::Phone,
                None if info.message().contains("email") => DuplicateContactField::Email,
                None => DuplicateContactField::Phone,
            };
            ContactPersistenceError::duplicate(field)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactPersistenceError::connection("database connection error")
        }
        _ => ContactPersistenceError::query("database error"),
    }
}

fn row_to_contact(row: ContactRow) -> Result<Contact, ContactPersistenceError> {
    row.into_domain()
        .map_err(|error| ContactPersistenceError::query(format!("stored contact invalid: {error}")))
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list(&self) -> Result<Vec<Contact>, ContactPersistenceError> {
        let mut conn = checkout(&self.pool).await.map_err(map_pool_error)?;
        // No ORDER BY: callers get storage-native order.
        let rows = contacts::table
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_contact).collect()
    }

    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactPersistenceError> {
        let mut conn = checkout(&self.pool).await.map_err(map_pool_error)?;
        let row = diesel::insert_into(contacts::table)
            .values(&ContactWriteRow::from(draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_contact(row)
    }

    async fn update(
        &self,
        id: i32,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactPersistenceError> {
        let mut conn = checkout(&self.pool).await.map_err(map_pool_error)?;
        let row = diesel::update(contacts::table.find(id))
            .set(&ContactWriteRow::from(draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_contact).transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, ContactPersistenceError> {
        let mut conn = checkout(&self.pool).await.map_err(map_pool_error)?;
        let deleted = diesel::delete(contacts::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
