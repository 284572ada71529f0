//! Shared helpers for HTTP handler tests.
//!
//! Builds apps over in-memory repositories so handler behaviour is
//! exercised without a database. The in-memory stores mirror the unique
//! constraints the real schema enforces.

use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test as actix_test, web, App};
use async_trait::async_trait;
use chrono::Duration;
use serde_json::Value;

use crate::auth::{AuthService, TokenSigner};
use crate::domain::ports::{
    ContactPersistenceError, ContactRepository, DuplicateContactField, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Contact, ContactDraft, User, Username};
use crate::inbound::http::contacts::{
    create_contact, delete_contact, list_contacts, update_contact,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{login, register, CredentialsRequest};

/// In-memory user store enforcing username uniqueness.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows.iter().find(|u| &u.username == username).cloned())
    }

    async fn insert(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, UserPersistenceError> {
        let mut rows = self.rows.lock().expect("lock");
        if rows.iter().any(|u| &u.username == username) {
            return Err(UserPersistenceError::DuplicateUsername);
        }
        let user = User {
            id: i32::try_from(rows.len()).expect("small test set") + 1,
            username: username.clone(),
            password_hash: password_hash.to_owned(),
        };
        rows.push(user.clone());
        Ok(user)
    }
}

/// In-memory contact store preserving insertion order and enforcing the
/// email/phone unique constraints.
#[derive(Default)]
pub struct InMemoryContactRepository {
    state: Mutex<ContactStoreState>,
}

#[derive(Default)]
struct ContactStoreState {
    rows: Vec<Contact>,
    next_id: i32,
}

fn duplicate_within(
    rows: &[Contact],
    draft: &ContactDraft,
    exclude_id: Option<i32>,
) -> Option<DuplicateContactField> {
    for row in rows {
        if Some(row.id) == exclude_id {
            continue;
        }
        if row.email == draft.email {
            return Some(DuplicateContactField::Email);
        }
        if row.phone == draft.phone {
            return Some(DuplicateContactField::Phone);
        }
    }
    None
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list(&self) -> Result<Vec<Contact>, ContactPersistenceError> {
        Ok(self.state.lock().expect("lock").rows.clone())
    }

    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactPersistenceError> {
        let mut state = self.state.lock().expect("lock");
        if let Some(field) = duplicate_within(&state.rows, draft, None) {
            return Err(ContactPersistenceError::duplicate(field));
        }
        state.next_id += 1;
        let contact = Contact::from_draft(state.next_id, draft.clone());
        state.rows.push(contact.clone());
        Ok(contact)
    }

    async fn update(
        &self,
        id: i32,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactPersistenceError> {
        let mut state = self.state.lock().expect("lock");
        // No row means no constraint can fire: check existence first, as
        // the real adapter does.
        if !state.rows.iter().any(|c| c.id == id) {
            return Ok(None);
        }
        if let Some(field) = duplicate_within(&state.rows, draft, Some(id)) {
            return Err(ContactPersistenceError::duplicate(field));
        }
        let row = state
            .rows
            .iter_mut()
            .find(|c| c.id == id)
            .expect("row exists");
        *row = Contact::from_draft(id, draft.clone());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ContactPersistenceError> {
        let mut state = self.state.lock().expect("lock");
        let before = state.rows.len();
        state.rows.retain(|c| c.id != id);
        Ok(state.rows.len() < before)
    }
}

/// Fresh HTTP state backed by empty in-memory repositories.
pub fn test_state() -> web::Data<HttpState> {
    let users = Arc::new(InMemoryUserRepository::default());
    let signer = TokenSigner::new("test-secret", Duration::minutes(30));
    let auth = Arc::new(AuthService::new(users, signer));
    let contacts = Arc::new(InMemoryContactRepository::default());
    web::Data::new(HttpState::new(auth, contacts))
}

/// App with every route registered, over a fresh [`test_state`].
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(test_state())
        .service(register)
        .service(login)
        .service(list_contacts)
        .service(create_contact)
        .service(update_contact)
        .service(delete_contact)
}

/// Read and parse a JSON response body.
pub async fn read_json<B>(response: ServiceResponse<B>) -> Value
where
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("json body")
}

/// Register a fixture account and return a valid bearer token for it.
pub async fn login_for_token<S, B>(app: &S) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let credentials = CredentialsRequest {
        username: "tester".into(),
        password: "password".into(),
    };

    let registered = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert!(registered.status().is_success(), "fixture registration");

    let logged_in = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert!(logged_in.status().is_success(), "fixture login");

    let body = read_json(logged_in).await;
    body.get("access_token")
        .and_then(Value::as_str)
        .expect("access token")
        .to_owned()
}
