//! Command language for the address book
//!
//! Commands are either slash commands (`/add`, `/list`, ...) or the menu
//! numbers `1`..`7`. A command typed without its argument asks for it field
//! by field, see [`Parsed::NeedsInput`].

use cb_contacts::{ContactId, NewContact};

use crate::error::{BookError, Result};

/// Slash commands with their description, in menu order
pub const COMMANDS: &[(&str, &str)] = &[
    ("/add", "Add a contact (name | email | phone)"),
    ("/list", "List all contacts"),
    ("/get", "Show a contact by id"),
    ("/delete", "Delete a contact by id"),
    ("/search", "Search contacts by name"),
    ("/email", "Find a contact by email"),
    ("/exit", "Quit"),
    ("/help", "Show this help"),
];

pub const ADD_USAGE: &str = "/add <name> [| <email> [| <phone>]]";

/// A fully specified command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(NewContact),
    List,
    Get(ContactId),
    Delete(ContactId),
    SearchName(String),
    SearchEmail(String),
    Help,
    Exit,
}

/// Commands whose arguments can be asked for interactively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Add,
    Get,
    Delete,
    SearchName,
    SearchEmail,
}

impl CommandKind {
    /// Labels of the fields to ask for, in order
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Add => &["Name", "Email", "Phone"],
            Self::Get => &["Contact id"],
            Self::Delete => &["Contact id to delete"],
            Self::SearchName => &["Name to search"],
            Self::SearchEmail => &["Email to search"],
        }
    }

    /// Build the command from answers to [`fields`](Self::fields)
    pub fn build(self, values: &[String]) -> Result<Command> {
        let value = |i: usize| values.get(i).cloned().unwrap_or_default();

        match self {
            Self::Add => Ok(Command::Add(
                NewContact::new(value(0))
                    .with_email(value(1))
                    .with_phone(value(2)),
            )),
            Self::Get => parse_id(&value(0)).map(Command::Get),
            Self::Delete => parse_id(&value(0)).map(Command::Delete),
            Self::SearchName => Ok(Command::SearchName(value(0))),
            Self::SearchEmail => Ok(Command::SearchEmail(value(0))),
        }
    }
}

/// Result of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Nothing to do
    Empty,
    Ready(Command),
    /// The command's arguments are still missing
    NeedsInput(CommandKind),
}

impl Parsed {
    /// Parse one line of user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::Empty);
        }

        let (head, rest) = match input.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (input, ""),
        };

        let parsed = match head.to_lowercase().as_str() {
            "/add" | "1" => {
                if rest.is_empty() {
                    Self::NeedsInput(CommandKind::Add)
                } else {
                    Self::Ready(parse_add(rest)?)
                }
            }
            "/list" | "/ls" | "2" => Self::Ready(Command::List),
            "/get" | "3" => with_id(rest, CommandKind::Get, Command::Get)?,
            "/delete" | "/rm" | "4" => with_id(rest, CommandKind::Delete, Command::Delete)?,
            // `/search` alone is an empty query, which matches every contact
            "/search" => Self::Ready(Command::SearchName(rest.to_string())),
            "5" => {
                if rest.is_empty() {
                    Self::NeedsInput(CommandKind::SearchName)
                } else {
                    Self::Ready(Command::SearchName(rest.to_string()))
                }
            }
            "/email" | "6" => {
                if rest.is_empty() {
                    Self::NeedsInput(CommandKind::SearchEmail)
                } else {
                    Self::Ready(Command::SearchEmail(rest.to_string()))
                }
            }
            "/exit" | "/quit" | "/q" | "7" => Self::Ready(Command::Exit),
            "/help" | "/?" => Self::Ready(Command::Help),
            _ => return Err(BookError::UnknownCommand(head.to_string())),
        };

        Ok(parsed)
    }
}

fn with_id(
    rest: &str,
    kind: CommandKind,
    build: fn(ContactId) -> Command,
) -> Result<Parsed> {
    if rest.is_empty() {
        Ok(Parsed::NeedsInput(kind))
    } else {
        parse_id(rest).map(|id| Parsed::Ready(build(id)))
    }
}

/// `name | email | phone`, trailing fields optional
fn parse_add(rest: &str) -> Result<Command> {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    if parts.len() > 3 {
        return Err(BookError::Usage(ADD_USAGE));
    }

    let part = |i: usize| parts.get(i).copied().unwrap_or_default();
    Ok(Command::Add(
        NewContact::new(part(0))
            .with_email(part(1))
            .with_phone(part(2)),
    ))
}

fn parse_id(value: &str) -> Result<ContactId> {
    let value = value.trim();
    value
        .parse()
        .map_err(|_| BookError::InvalidId(value.to_string()))
}
