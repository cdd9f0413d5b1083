//! Command execution and result rendering

use cb_contacts::{Contact, ContactId, SharedContactRegistry};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::command::{COMMANDS, Command};
use crate::error::Result;

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Added { contact: Contact },
    Listed { contacts: Vec<Contact> },
    Found { contact: Contact },
    Deleted { id: ContactId },
    Matches { contacts: Vec<Contact> },
    Help,
    Exit,
}

/// Run a command against the registry
pub async fn execute(command: Command, registry: &SharedContactRegistry) -> Result<Outcome> {
    let outcome = match command {
        Command::Add(input) => {
            let contact = registry.insert(input).await;
            info!("Contact {} added", contact.id);
            Outcome::Added { contact }
        }
        Command::List => Outcome::Listed {
            contacts: registry.list().await,
        },
        Command::Get(id) => Outcome::Found {
            contact: registry.get(id).await?,
        },
        Command::Delete(id) => {
            registry.delete(id).await?;
            info!("Contact {} deleted", id);
            Outcome::Deleted { id }
        }
        Command::SearchName(query) => Outcome::Matches {
            contacts: registry.search_by_name(&query).await,
        },
        Command::SearchEmail(email) => Outcome::Found {
            contact: registry.search_by_email(&email).await?,
        },
        Command::Help => Outcome::Help,
        Command::Exit => Outcome::Exit,
    };

    Ok(outcome)
}

impl Outcome {
    /// Plain-text rendering for the terminal
    pub fn render(&self) -> String {
        match self {
            Self::Added { contact } => format!("Contact added (id: {})", contact.id),
            Self::Listed { contacts } => {
                if contacts.is_empty() {
                    "No contacts.".to_string()
                } else {
                    let mut out = String::from("Contacts:");
                    for contact in contacts {
                        out.push_str("\n  ");
                        out.push_str(&contact_line(contact));
                    }
                    out
                }
            }
            Self::Found { contact } => contact_detail(contact),
            Self::Deleted { id } => format!("Contact {} deleted", id),
            Self::Matches { contacts } => {
                if contacts.is_empty() {
                    "No results.".to_string()
                } else {
                    let mut out = format!("{} result(s):", contacts.len());
                    for contact in contacts {
                        out.push_str("\n  ");
                        out.push_str(&contact_line(contact));
                    }
                    out
                }
            }
            Self::Help => help_text(),
            Self::Exit => "Goodbye!".to_string(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

/// `[id] name - email - phone`
pub fn contact_line(contact: &Contact) -> String {
    format!(
        "[{}] {} - {} - {}",
        contact.id, contact.name, contact.email, contact.phone
    )
}

fn contact_detail(contact: &Contact) -> String {
    format!(
        "[{}] {}\nEmail: {}\nPhone: {}",
        contact.id, contact.name, contact.email, contact.phone
    )
}

/// Command list with descriptions
pub fn help_text() -> String {
    let mut out = String::from("Available commands:");
    for (i, (cmd, desc)) in COMMANDS.iter().enumerate() {
        // menu numbers stop at /exit
        if i < 7 {
            out.push_str(&format!("\n  {} ({}) - {}", cmd, i + 1, desc));
        } else {
            out.push_str(&format!("\n  {} - {}", cmd, desc));
        }
    }
    out
}
