//! Implementations of the crmd subcommands.

use crm_auth::{jwt::JwtKeys, secret_hash::hash_secret};
use crm_models::{
    account::NewAccount,
    db::connection::DbConnection,
    store::AccountStore,
};
use crm_web::{router::serve, state::AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    config::{ServerConfig, StoreConfig},
    prelude::*,
};

/// Runs the API until Ctrl-C.
pub async fn handle_serve() -> Result<()> {
    let config = ServerConfig::from_env()?;
    info!("Starting crmd with {config}");

    let keys = JwtKeys::new(config.jwt_secret.as_bytes());
    let state = match &config.store {
        StoreConfig::Postgres(db) => AppState::with_store(DbConnection::new(db)?.setup()?, keys),
        StoreConfig::Memory => {
            warn!("Using the in-memory store, data is lost on exit");
            AppState::memory(keys)
        }
    };

    let listener = TcpListener::bind(config.bind).await?;
    serve(listener, state, shutdown_signal()).await?;
    info!("Shutting down");
    Ok(())
}

/// Creates an administrator account. Prompts for the password when it is
/// not given on the command line.
pub fn handle_create_admin(email: String, password: Option<String>) -> Result<()> {
    let StoreConfig::Postgres(db) = StoreConfig::from_env()? else {
        return Err(Error::NoPersistentStore);
    };

    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password > ")?,
    };
    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }

    let connection = DbConnection::new(&db)?.setup()?;
    let hash = hash_secret(&password)?;
    let account = AccountStore::create(&connection, NewAccount::admin(email, hash))?;
    info!("Created admin account {}", account.email);
    println!("Created admin account {}", account.email);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
