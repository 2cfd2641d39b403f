//! One-way hashing of account secrets with Argon2.
//!
//! Hashes are stored as PHC strings, so salt and parameters travel with the
//! hash and [`verify_secret`] needs nothing else.
//!
//! A secret that does not match is an ordinary outcome of login, so
//! [`verify_secret`] answers `Ok(false)` and leaves the choice of error to
//! the caller. `Err` means the stored hash is unusable, which is a server
//! fault rather than bad credentials.
//!
//! ```rust
//! use crm_auth::secret_hash::{hash_secret, verify_secret};
//!
//! let hash = hash_secret("pw1").unwrap();
//! assert!(verify_secret("pw1", &hash).unwrap());
//! assert!(!verify_secret("wrong", &hash).unwrap());
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHash, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Hashes `secret` with a fresh random salt.
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks `secret` against a stored PHC hash.
pub fn verify_secret(secret: &str, hash: &str) -> Result<bool> {
    let stored = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(secret.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
