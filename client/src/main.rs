//! Interactive contact book client.
//!
//! A small command loop over the backend API: authenticate, then list,
//! add, update, and delete contacts. Forms validate locally before any
//! request is sent, and every mutation refetches the list so the
//! rendered view always matches server state.

mod api;
mod session;
mod ui;
mod validate;

use clap::Parser;
use color_eyre::eyre::Result;

use crate::api::{ApiClient, ApiError};
use crate::session::SessionContext;
use crate::validate::validate_contact_form;

#[derive(Parser, Debug)]
#[command(name = "contact-book", about = "Contact book terminal client")]
struct Cli {
    /// Base URL of the backend API.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url);
    let mut session = SessionContext::new();

    println!("Contact Book ({})", cli.api_url);
    print_help();

    loop {
        let line = ui::prompt_raw("> ")?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let argument = parts.next();

        match command {
            "register" => register(&client).await?,
            "login" => login(&client, &mut session).await?,
            "logout" => {
                session.clear();
                ui::show_success("logged out");
            }
            "list" => refresh(&client, &session).await,
            "add" => add_contact(&client, &session).await?,
            "update" => match parse_id(argument) {
                Some(id) => update_contact(&client, &session, id).await?,
                None => ui::show_error("usage: update <id>"),
            },
            "delete" => match parse_id(argument) {
                Some(id) => delete_contact(&client, &session, id).await,
                None => ui::show_error("usage: delete <id>"),
            },
            "help" => print_help(),
            "quit" | "exit" => break,
            other => ui::show_error(&format!("unknown command: {other}")),
        }
    }

    Ok(())
}

fn print_help() {
    println!("commands: register, login, logout, list, add, update <id>, delete <id>, help, quit");
}

fn parse_id(argument: Option<&str>) -> Option<i32> {
    argument.and_then(|raw| raw.parse().ok())
}

async fn register(client: &ApiClient) -> Result<()> {
    let username = ui::prompt("username")?;
    let password = ui::prompt("password")?;
    if username.is_empty() || password.is_empty() {
        ui::show_error("All fields are required.");
        return Ok(());
    }
    match client.register(&username, &password).await {
        Ok(detail) => ui::show_success(&detail),
        Err(error) => report(&error),
    }
    Ok(())
}

async fn login(client: &ApiClient, session: &mut SessionContext) -> Result<()> {
    let username = ui::prompt("username")?;
    let password = ui::prompt("password")?;
    if username.is_empty() || password.is_empty() {
        ui::show_error("All fields are required.");
        return Ok(());
    }
    match client.login(&username, &password).await {
        Ok(token) => {
            session.establish(token);
            ui::show_success("Login successful");
            refresh(client, session).await;
        }
        Err(error) => report(&error),
    }
    Ok(())
}

async fn add_contact(client: &ApiClient, session: &SessionContext) -> Result<()> {
    let name = ui::prompt("name")?;
    let email = ui::prompt("email")?;
    let contact = ui::prompt("contact number")?;
    if let Err(error) = validate_contact_form(&name, &email, &contact) {
        ui::show_error(&error.to_string());
        return Ok(());
    }
    match client.create_contact(session, &name, &email, &contact).await {
        Ok(created) => {
            ui::show_success(&format!("Contact '{}' added", created.name));
            refresh(client, session).await;
        }
        Err(error) => report(&error),
    }
    Ok(())
}

async fn update_contact(client: &ApiClient, session: &SessionContext, id: i32) -> Result<()> {
    let contacts = match client.list_contacts(session).await {
        Ok(contacts) => contacts,
        Err(error) => {
            report(&error);
            return Ok(());
        }
    };
    let Some(existing) = contacts.iter().find(|contact| contact.id == id) else {
        ui::show_error("contact not found");
        return Ok(());
    };

    let name = ui::prompt_with_default("name", &existing.name)?;
    let email = ui::prompt_with_default("email", &existing.email)?;
    let contact = ui::prompt_with_default("contact number", &existing.contact)?;
    if let Err(error) = validate_contact_form(&name, &email, &contact) {
        ui::show_error(&error.to_string());
        return Ok(());
    }
    match client
        .update_contact(session, id, &name, &email, &contact)
        .await
    {
        Ok(updated) => {
            ui::show_success(&format!("Contact '{}' updated", updated.name));
            refresh(client, session).await;
        }
        Err(error) => report(&error),
    }
    Ok(())
}

async fn delete_contact(client: &ApiClient, session: &SessionContext, id: i32) {
    match client.delete_contact(session, id).await {
        Ok(detail) => {
            ui::show_success(&detail);
            refresh(client, session).await;
        }
        Err(error) => report(&error),
    }
}

/// Refetch the contact list and redraw it.
async fn refresh(client: &ApiClient, session: &SessionContext) {
    match client.list_contacts(session).await {
        Ok(contacts) => ui::render_contacts(&contacts),
        Err(error) => report(&error),
    }
}

fn report(error: &ApiError) {
    match error {
        ApiError::NotLoggedIn => ui::show_error("please login first"),
        ApiError::Api { status, detail } if *status >= 500 => {
            ui::show_error(&format!("server error ({status}): {detail}"));
        }
        ApiError::Api { detail, .. } => ui::show_error(detail),
        ApiError::Transport(cause) => ui::show_error(&format!("request failed: {cause}")),
    }
}
