//! Request context management for web handlers.
//!
//! [`resolver::mw_ctx_resolver`] verifies the bearer token of every request
//! and stores the outcome in the request extensions. Handlers and guards
//! pull it back out with the [`Ctx`] extractor.

use crm_auth::role::Role;

use crate::auth_token::AuthToken;

pub mod resolver;

/// The authenticated caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    /// Account email taken from the token subject.
    pub email: String,
    pub role: Role,
}

impl Ctx {
    /// ```rust
    /// use crm_auth::role::Role;
    /// use crm_web::ctx::Ctx;
    ///
    /// let ctx = Ctx::new("a@x.com", Role::User);
    /// assert!(!ctx.is_admin());
    /// ```
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<AuthToken> for Ctx {
    fn from(token: AuthToken) -> Self {
        Self::new(token.sub, token.role)
    }
}
