//! cb-contacts: In-memory address book for contact-book
//!
//! This crate owns every contact record and the handle counter.
//!
//! ## Features
//!
//! - Contact creation with auto-incremented handles (never reused)
//! - Lookup and deletion by handle
//! - Case-insensitive search by name (substring) and email (exact)
//! - Lock-guarded shared handle for concurrent callers
//!
//! ## Usage
//!
//! ```rust
//! use cb_contacts::ContactRegistry;
//!
//! let mut registry = ContactRegistry::new();
//! let alice = registry.add("Alice Dupont", "alice@email.com", "0601020304");
//! assert_eq!(alice.id, 0);
//!
//! let found = registry.search_by_email("ALICE@EMAIL.COM").unwrap();
//! assert_eq!(found, alice);
//!
//! registry.delete(alice.id).unwrap();
//! assert!(registry.get(alice.id).is_err());
//! ```

pub mod error;
pub mod models;
pub mod registry;
pub mod shared;

pub use error::{ContactsError, LookupKey, Result};
pub use models::{Contact, ContactId, NewContact};
pub use registry::ContactRegistry;
pub use shared::SharedContactRegistry;

/// Re-export models for easy use
pub mod prelude {
    pub use super::{Contact, ContactId, ContactRegistry, ContactsError, NewContact};
}
