//! Contact CRUD handlers.
//!
//! ```text
//! GET    /contacts/     list every contact
//! POST   /contacts/     create a contact
//! PUT    /contacts/{id} full-field replace
//! DELETE /contacts/{id} remove a contact
//! ```
//!
//! Every endpoint requires a verified bearer token. The token's subject
//! is not used for scoping: all authenticated users share one list.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{ContactPersistenceError, DuplicateContactField};
use crate::domain::{Contact, ContactDraft, ContactValidationError, Error};
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::DetailResponse;

/// Mutable contact fields as submitted by the client. The phone number
/// travels under the `contact` key on the wire.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl TryFrom<ContactPayload> for ContactDraft {
    type Error = ContactValidationError;

    fn try_from(value: ContactPayload) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, &value.contact)
    }
}

/// A persisted contact: `{id, name, email, contact}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            id: value.id,
            name: value.name.into(),
            email: value.email.into(),
            contact: value.phone.into(),
        }
    }
}

/// List every contact in storage order, unpaginated.
#[utoipa::path(
    get,
    path = "/contacts/",
    responses(
        (status = 200, description = "All contacts", body = [ContactResponse]),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts/")]
pub async fn list_contacts(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let contacts = state
        .contacts
        .list()
        .await
        .map_err(map_contact_persistence_error)?;
    Ok(web::Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

/// Create a contact.
#[utoipa::path(
    post,
    path = "/contacts/",
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Created contact", body = ContactResponse),
        (status = 400, description = "Invalid request or duplicate email/phone", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts/")]
pub async fn create_contact(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<ContactPayload>,
) -> ApiResult<web::Json<ContactResponse>> {
    let draft =
        ContactDraft::try_from(payload.into_inner()).map_err(map_contact_validation_error)?;
    let contact = state
        .contacts
        .insert(&draft)
        .await
        .map_err(map_contact_persistence_error)?;
    Ok(web::Json(contact.into()))
}

/// Replace every field of an existing contact.
#[utoipa::path(
    put,
    path = "/contacts/{id}",
    request_body = ContactPayload,
    params(("id", description = "Contact id assigned by storage")),
    responses(
        (status = 200, description = "Updated contact", body = ContactResponse),
        (status = 400, description = "Invalid request or duplicate email/phone", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown contact id", body = crate::inbound::http::error::ApiError),
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    payload: web::Json<ContactPayload>,
) -> ApiResult<web::Json<ContactResponse>> {
    let draft =
        ContactDraft::try_from(payload.into_inner()).map_err(map_contact_validation_error)?;
    let updated = state
        .contacts
        .update(id.into_inner(), &draft)
        .await
        .map_err(map_contact_persistence_error)?
        .ok_or_else(|| Error::not_found("contact not found"))?;
    Ok(web::Json(updated.into()))
}

/// Delete a contact.
#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    params(("id", description = "Contact id assigned by storage")),
    responses(
        (status = 200, description = "Contact deleted", body = DetailResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Unknown contact id", body = crate::inbound::http::error::ApiError),
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<DetailResponse>> {
    let deleted = state
        .contacts
        .delete(id.into_inner())
        .await
        .map_err(map_contact_persistence_error)?;
    if !deleted {
        return Err(Error::not_found("contact not found").into());
    }
    Ok(web::Json(DetailResponse::new("Deleted successfully")))
}

fn map_contact_validation_error(err: ContactValidationError) -> Error {
    let field = match err {
        ContactValidationError::EmptyName | ContactValidationError::NameTooLong { .. } => "name",
        ContactValidationError::EmptyEmail | ContactValidationError::EmailTooLong { .. } => {
            "email"
        }
        ContactValidationError::EmptyPhone | ContactValidationError::PhoneTooLong { .. } => {
            "contact"
        }
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn map_contact_persistence_error(err: ContactPersistenceError) -> Error {
    match err {
        ContactPersistenceError::Duplicate { field } => {
            // `details.field` carries the wire key, not the column word.
            let wire_field = match field {
                DuplicateContactField::Email => "email",
                DuplicateContactField::Phone => "contact",
            };
            Error::conflict(format!("contact {field} already exists"))
                .with_details(json!({ "field": wire_field }))
        }
        ContactPersistenceError::Connection { message }
        | ContactPersistenceError::Query { message } => Error::internal(message),
    }
}
