//! Error types for cb-contacts

use std::fmt;

use thiserror::Error;

use crate::models::ContactId;

/// Key of a lookup that matched no contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// Lookup by numeric handle
    Id(ContactId),
    /// Lookup by email address
    Email(String),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {}", id),
            Self::Email(email) => write!(f, "email {}", email),
        }
    }
}

/// cb-contacts error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactsError {
    #[error("Contact not found: {0}")]
    NotFound(LookupKey),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ContactsError>;
