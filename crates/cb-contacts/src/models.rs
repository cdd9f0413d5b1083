//! Data models for the contact registry

use serde::Serialize;

/// Numeric handle assigned by the registry
pub type ContactId = u64;

/// Contact record owned by a [`ContactRegistry`](crate::ContactRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Handle assigned at creation, never reused
    pub id: ContactId,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
}

/// Input for adding a contact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewContact {
    /// Create a new contact input with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}
