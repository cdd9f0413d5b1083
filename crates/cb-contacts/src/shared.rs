//! Thread-safe registry handle
//!
//! Wraps a [`ContactRegistry`] behind a single `RwLock` so that several tasks
//! can share one address book. Mutations take the write guard, lookups and
//! searches take the read guard.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{Contact, ContactId, NewContact};
use crate::registry::ContactRegistry;

/// Cloneable handle to a shared [`ContactRegistry`]
#[derive(Debug, Clone, Default)]
pub struct SharedContactRegistry {
    inner: Arc<RwLock<ContactRegistry>>,
}

impl SharedContactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing registry
    pub fn from_registry(registry: ContactRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub async fn add(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Contact {
        self.inner.write().await.add(name, email, phone)
    }

    pub async fn insert(&self, input: NewContact) -> Contact {
        self.inner.write().await.insert(input)
    }

    pub async fn get(&self, id: ContactId) -> Result<Contact> {
        self.inner.read().await.get(id)
    }

    pub async fn list(&self) -> Vec<Contact> {
        self.inner.read().await.list()
    }

    pub async fn delete(&self, id: ContactId) -> Result<()> {
        self.inner.write().await.delete(id)
    }

    pub async fn search_by_name(&self, query: &str) -> Vec<Contact> {
        self.inner.read().await.search_by_name(query)
    }

    pub async fn search_by_email(&self, email: &str) -> Result<Contact> {
        self.inner.read().await.search_by_email(email)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
