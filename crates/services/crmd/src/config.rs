//! Service configuration, read from the environment.
//!
//! | Variable       | Default          |                                  |
//! |----------------|------------------|----------------------------------|
//! | `JWT_SECRET`   | required         | HS256 signing secret             |
//! | `CRM_STORE`    | `postgres`       | `postgres` or `memory`           |
//! | `DATABASE_URL` | required for pg  | PostgreSQL connection string     |
//! | `CRM_BIND`     | `127.0.0.1:3000` | listen address                   |

use std::{fmt, net::SocketAddr};

use crm_models::db::config::DbConfig;

use crate::prelude::*;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Where the service keeps its data.
#[derive(Clone)]
pub enum StoreConfig {
    Postgres(DbConfig),
    /// Lost when the process exits.
    Memory,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup("CRM_STORE").as_deref() {
            None | Some("postgres") => {
                let url = required(&lookup, "DATABASE_URL")?;
                Ok(Self::Postgres(DbConfig::new(url)))
            }
            Some("memory") => Ok(Self::Memory),
            Some(other) => Err(Error::InvalidEnv {
                var: "CRM_STORE",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres(db) => write!(f, "postgres ({db})"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Everything `crmd serve` needs.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub jwt_secret: String,
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = lookup("CRM_BIND").unwrap_or_else(|| String::from(DEFAULT_BIND));
        let bind = bind.parse().map_err(|_| Error::InvalidEnv {
            var: "CRM_BIND",
            value: bind.clone(),
        })?;

        Ok(Self {
            bind,
            jwt_secret: required(&lookup, "JWT_SECRET")?,
            store: StoreConfig::from_lookup(&lookup)?,
        })
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bind={} store={}", self.bind, self.store)
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String> {
    lookup(var)
        .filter(|value| !value.is_empty())
        .ok_or(Error::MissingEnv(var))
}
