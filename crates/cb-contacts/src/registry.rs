//! In-memory contact registry

use tracing::debug;

use crate::error::{ContactsError, LookupKey, Result};
use crate::models::{Contact, ContactId, NewContact};

/// Owner of all contact records and of handle assignment
///
/// Contacts are kept in insertion order. Every lookup is a linear scan and the
/// first match in insertion order wins.
#[derive(Debug, Default)]
pub struct ContactRegistry {
    contacts: Vec<Contact>,
    next_id: ContactId,
}

impl ContactRegistry {
    /// Create an empty registry whose first contact gets id 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contact and return it
    pub fn add(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Contact {
        let contact = Contact {
            id: self.next_id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        };
        self.contacts.push(contact.clone());
        self.next_id += 1;

        debug!("Added contact {} ({})", contact.id, contact.name);
        contact
    }

    /// Add a contact from a [`NewContact`]
    pub fn insert(&mut self, input: NewContact) -> Contact {
        self.add(input.name, input.email, input.phone)
    }

    /// Get a contact by id
    pub fn get(&self, id: ContactId) -> Result<Contact> {
        self.contacts
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| {
                debug!("No contact with id {}", id);
                ContactsError::NotFound(LookupKey::Id(id))
            })
    }

    /// All contacts in insertion order
    pub fn list(&self) -> Vec<Contact> {
        self.contacts.clone()
    }

    /// Delete a contact by id
    pub fn delete(&mut self, id: ContactId) -> Result<()> {
        let Some(pos) = self.contacts.iter().position(|c| c.id == id) else {
            debug!("Cannot delete missing contact {}", id);
            return Err(ContactsError::NotFound(LookupKey::Id(id)));
        };

        let removed = self.contacts.remove(pos);
        debug!("Deleted contact {} ({})", removed.id, removed.name);
        Ok(())
    }

    /// Contacts whose name contains `query`, ignoring case
    ///
    /// An empty query matches every contact.
    pub fn search_by_name(&self, query: &str) -> Vec<Contact> {
        let query = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// First contact whose email equals `email`, ignoring case
    pub fn search_by_email(&self, email: &str) -> Result<Contact> {
        let wanted = email.to_lowercase();
        self.contacts
            .iter()
            .find(|c| c.email.to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| {
                debug!("No contact with email {}", email);
                ContactsError::NotFound(LookupKey::Email(email.to_string()))
            })
    }

    /// Number of live contacts
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Handle the next added contact will receive
    pub fn next_id(&self) -> ContactId {
        self.next_id
    }
}
