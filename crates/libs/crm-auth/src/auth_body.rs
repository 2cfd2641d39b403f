//! Login response body.

use serde::{Deserialize, Serialize};

use super::CONNECTION_TOKEN_TYPE;

/// Body returned by a successful login.
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "Bearer"
/// }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthBody {
    /// The signed session token.
    pub token: String,
    /// Always "Bearer".
    pub token_type: String,
}

impl AuthBody {
    /// Wraps a signed token.
    ///
    /// ```rust
    /// use crm_auth::auth_body::AuthBody;
    ///
    /// let body = AuthBody::new("some_token".to_string());
    /// assert_eq!(body.token_type, "Bearer");
    /// ```
    pub fn new(token: String) -> Self {
        Self {
            token,
            token_type: String::from(CONNECTION_TOKEN_TYPE),
        }
    }
}
