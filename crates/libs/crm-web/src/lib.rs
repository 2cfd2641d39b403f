//! HTTP layer of the CRM backend.
//!
//! Token resolution ([`ctx`]), access guards ([`mw_auth`]), the account and
//! CRM resource handlers and the [`router`] that wires them onto an
//! [`state::AppState`].
//!
//! ```rust,no_run
//! use crm_auth::jwt::JwtKeys;
//! use crm_web::{router::serve, state::AppState};
//!
//! # async fn run() -> crm_web::prelude::Result<()> {
//! let state = AppState::memory(JwtKeys::new(b"secret"));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! serve(listener, state, std::future::pending()).await
//! # }
//! ```

pub mod account;
pub mod auth_token;
pub mod crm;
pub mod ctx;
pub mod error;
pub mod extract;
pub mod mw_auth;
pub mod prelude;
pub mod router;
pub mod state;
