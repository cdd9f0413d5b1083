//! cb-core: contact-book Core Library
//!
//! Configuration loading and the shared error type used by the
//! contact-book binary.

pub mod config;
pub mod error;

pub use config::{CliConfig, Config, DEFAULT_CONFIG_FILE, LogConfig, SeedConfig, SeedContact};
pub use error::{Error, Result};
