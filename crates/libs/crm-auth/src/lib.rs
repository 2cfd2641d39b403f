//! Authentication primitives for the CRM backend.
//!
//! Secret hashing ([`secret_hash`]), signing keys and JWT encoding
//! ([`jwt`]), the role model ([`role`]) and the login response body
//! ([`auth_body`]). Nothing in here touches HTTP or storage.

pub mod auth_body;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod role;
pub mod secret_hash;

pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";
pub const AUTH_HEADER: &str = "Authorization";
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
pub const ISS: &str = "CRM";
