//! JWT signing and verification.
//!
//! [`JwtKeys`] owns the HS256 key pair derived from the server secret. It is
//! built once at startup from configuration and handed to whoever needs to
//! issue or verify tokens.
//!
//! # Examples
//!
//! ```rust
//! use crm_auth::jwt::JwtKeys;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
//! struct UserClaims {
//!     sub: String,
//!     iss: String,
//!     exp: i64,
//! }
//!
//! let keys = JwtKeys::new(b"MySuperSecret");
//! let claims = UserClaims {
//!     sub: "a@x.com".to_string(),
//!     iss: "CRM".to_string(),
//!     exp: 4118335200,
//! };
//!
//! let token = keys.encode(&claims).unwrap();
//! let decoded: UserClaims = keys.decode(&token).unwrap();
//! assert_eq!(claims, decoded);
//! ```

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{ISS, prelude::*};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Key pair used to sign and verify session tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    /// Derives both keys from the raw server secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked by the caller against its own clock, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[ISS]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signs `body` into a compact JWT.
    pub fn encode<T: Serialize>(&self, body: &T) -> Result<String> {
        Ok(encode(&Header::new(ALGORITHM), body, &self.encoding)?)
    }

    /// Verifies the signature, algorithm and issuer of `token` and returns
    /// its claims.
    ///
    /// Any failure (bad signature, wrong algorithm, malformed token, claims
    /// that don't deserialize) is reported as [`Error::InvalidToken`].
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        decode::<T>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                debug!("Rejected token: {err}");
                Error::InvalidToken
            })
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtKeys(REDACTED)")
    }
}
