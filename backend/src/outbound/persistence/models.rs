//! Row structs bridging Diesel and the domain.

use diesel::prelude::*;

use crate::domain::contact::{ContactEmail, ContactName, ContactPhone};
use crate::domain::{Contact, ContactValidationError, CredentialValidationError, User, Username};

use super::schema::{contacts, users};

/// A `users` row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
}

impl UserRow {
    /// Convert to the domain entity; fails only if stored data no longer
    /// satisfies the domain invariants.
    pub fn into_domain(self) -> Result<User, CredentialValidationError> {
        Ok(User {
            id: self.id,
            username: Username::new(self.username)?,
            password_hash: self.password,
        })
    }
}

/// Insertable `users` row; storage assigns the id.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// A `contacts` row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContactRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl ContactRow {
    /// Convert to the domain entity; fails only if stored data no longer
    /// satisfies the domain invariants.
    pub fn into_domain(self) -> Result<Contact, ContactValidationError> {
        Ok(Contact {
            id: self.id,
            name: ContactName::new(self.name)?,
            email: ContactEmail::new(self.email)?,
            phone: ContactPhone::new(self.contact)?,
        })
    }
}

/// Write shape shared by contact insert and full-field update.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = contacts)]
pub struct ContactWriteRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub contact: &'a str,
}

impl<'a> From<&'a crate::domain::ContactDraft> for ContactWriteRow<'a> {
    fn from(draft: &'a crate::domain::ContactDraft) -> Self {
        Self {
            name: draft.name.as_str(),
            email: draft.email.as_str(),
            contact: draft.phone.as_str(),
        }
    }
}
