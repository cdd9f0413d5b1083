//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. `contact-book.toml` config file
//! 3. Defaults
//!
//! `${VAR_NAME}` inside the config file is replaced with the environment
//! variable's value.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Default config file name, looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "contact-book.toml";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Interactive CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    /// Print the welcome banner on start-up
    #[serde(default = "default_true")]
    pub banner: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { banner: true }
    }
}

/// A contact added to the registry at start-up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedContact {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl SeedContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Start-up contacts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedConfig {
    /// Whether to add `contacts` to the fresh registry
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Contacts to add, in order
    #[serde(default = "default_seed_contacts")]
    pub contacts: Vec<SeedContact>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            contacts: default_seed_contacts(),
        }
    }
}

impl SeedConfig {
    /// Contacts to add at start-up, empty when seeding is disabled
    pub fn active_contacts(&self) -> &[SeedContact] {
        if self.enabled { &self.contacts[..] } else { &[] }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

fn default_seed_contacts() -> Vec<SeedContact> {
    vec![
        SeedContact::new("Alice Dupont", "alice@email.com", "0601020304"),
        SeedContact::new("Bob Martin", "bob@email.com", "0605060708"),
    ]
}

/// Main configuration for contact-book
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub cli: CliConfig,

    #[serde(default)]
    pub seed: SeedConfig,
}

impl Config {
    /// Replace `${VAR_NAME}` with the environment variable's value
    fn expand_env_vars(value: &str) -> String {
        Self::expand_vars(value, |name| std::env::var(name).ok())
    }

    /// Replace `${VAR_NAME}` with `lookup(VAR_NAME)`, empty when it yields nothing
    fn expand_vars<F>(value: &str, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Some(var_value) = lookup(&var_name) {
                    result.push_str(&var_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Parse configuration from TOML text
    ///
    /// Environment variables are expanded but not applied as overrides.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded = Self::expand_env_vars(content);
        toml::from_str(&expanded).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let mut cfg = Self::from_toml_str(&content)?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Load configuration from `./contact-book.toml` if present, else defaults
    pub fn load() -> crate::Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Ok(Self::from_env())
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filter) = lookup("CONTACT_BOOK_LOG") {
            if !filter.is_empty() {
                self.log.filter = filter;
            }
        }

        if let Some(banner) = lookup("CONTACT_BOOK_BANNER") {
            self.cli.banner = banner.to_lowercase() != "false";
        }

        if let Some(seed) = lookup("CONTACT_BOOK_SEED") {
            self.seed.enabled = seed.to_lowercase() != "false";
        }
    }
}
