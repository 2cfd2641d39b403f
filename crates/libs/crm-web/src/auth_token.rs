//! Session tokens and credential checks.

use chrono::{DateTime, Utc};
use crm_auth::{ISS, auth_body::AuthBody, jwt::JwtKeys, role::Role, secret_hash::verify_secret};
use crm_models::{account::Account, store::AccountStore};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::prelude::*;

/// Seconds a session token stays valid after it is issued.
pub const TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Account email.
    pub sub: String,
    pub role: Role,
    /// Issuer.
    pub iss: String,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    /// Expiration time. The token is rejected from this second on.
    pub exp: i64,
}

impl AuthToken {
    /// Claims for `email` issued at `now`, expiring [`TOKEN_LIFETIME_SECS`]
    /// later.
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use crm_auth::role::Role;
    /// use crm_web::auth_token::{AuthToken, TOKEN_LIFETIME_SECS};
    ///
    /// let token = AuthToken::new("a@x.com", Role::User, Utc::now());
    /// assert_eq!(token.exp - token.iat, TOKEN_LIFETIME_SECS);
    /// ```
    pub fn new(email: impl Into<String>, role: Role, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            sub: email.into(),
            role,
            iss: String::from(ISS),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Checks a login request against the stored account.
///
/// An unknown email, the empty one included, is [`Error::NotFound`]. A
/// wrong or empty password is [`Error::WrongCredentials`].
pub fn authenticate(login: &LoginRequest, accounts: &dyn AccountStore) -> Result<Account> {
    let account = accounts
        .fetch_by_email(&login.email)?
        .ok_or(Error::NotFound("User"))?;
    if !verify_secret(&login.password, &account.hash)? {
        return Err(Error::WrongCredentials);
    }
    Ok(account)
}

/// Signs `token` into the login response body.
pub fn encode_token(keys: &JwtKeys, token: &AuthToken) -> Result<AuthBody> {
    let token = keys.encode(token).map_err(|err| {
        error!("Failed to encode JWT {err}");
        err
    })?;

    Ok(AuthBody::new(token))
}

/// Verifies `token` and checks it has not expired at `now`.
pub fn decode_token(
    keys: &JwtKeys,
    token: &str,
    now: DateTime<Utc>,
) -> std::result::Result<AuthToken, crm_auth::error::Error> {
    let claims: AuthToken = keys.decode(token)?;
    if claims.is_expired_at(now) {
        return Err(crm_auth::error::Error::TokenExpired);
    }
    Ok(claims)
}
