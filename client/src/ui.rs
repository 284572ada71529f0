//! Terminal rendering and input prompts.

use std::io::{self, Write};

use crate::api::Contact;

/// Render the full contact list, collapsible-item style.
pub fn render_contacts(contacts: &[Contact]) {
    println!();
    println!("Contact List ({} total)", contacts.len());
    println!("-----------------------------------------");
    if contacts.is_empty() {
        println!("  (no contacts yet)");
    }
    for contact in contacts {
        println!("  [{}] {}", contact.id, contact.name);
        println!("        email:   {}", contact.email);
        println!("        contact: {}", contact.contact);
    }
    println!();
}

/// Read a single trimmed line after printing `prefix` verbatim. Used for
/// the bare `> ` command prompt.
pub fn prompt_raw(prefix: &str) -> io::Result<String> {
    print!("{prefix}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

fn labelled(label: &str) -> String {
    format!("{label}: ")
}

/// Read a single trimmed line of input, labelling the field.
pub fn prompt(label: &str) -> io::Result<String> {
    prompt_raw(&labelled(label))
}

/// Read a line, keeping `current` when the input is empty. Used by the
/// update form, which arrives pre-filled with the contact's values.
pub fn prompt_with_default(label: &str, current: &str) -> io::Result<String> {
    let input = prompt(&format!("{label} [{current}]"))?;
    if input.is_empty() {
        Ok(current.to_owned())
    } else {
        Ok(input)
    }
}

/// Inline error line.
pub fn show_error(message: &str) {
    println!("error: {message}");
}

/// Inline success line.
pub fn show_success(message: &str) {
    println!("ok: {message}");
}
