//! Error types (contact-book)

use std::fmt;

use cb_contacts::ContactsError;

/// Errors surfaced to the user by a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Registry lookup failed
    Contacts(ContactsError),
    /// Input did not name a known command
    UnknownCommand(String),
    /// A contact id that is not a non-negative integer
    InvalidId(String),
    /// Malformed arguments for a known command
    Usage(&'static str),
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contacts(e) => write!(f, "{}", e),
            Self::UnknownCommand(c) => {
                write!(f, "Invalid choice: {}. Type /help for the command list.", c)
            }
            Self::InvalidId(s) => write!(f, "Invalid contact id: {}", s),
            Self::Usage(u) => write!(f, "Usage: {}", u),
        }
    }
}

impl std::error::Error for BookError {}

impl From<ContactsError> for BookError {
    fn from(e: ContactsError) -> Self {
        Self::Contacts(e)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BookError>;
