//! Database configuration management.

use std::fmt::Display;

/// Database connection configuration.
#[derive(Clone)]
pub struct DbConfig {
    /// PostgreSQL database URL.
    pub database_url: String,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}
