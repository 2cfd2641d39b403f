//! Account model.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{db::connection::DbConnection, prelude::*, schema::account::dsl, store::AccountStore};

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// A stored account.
///
/// Deliberately not `Serialize`: the hash must never leave the server.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::account)]
#[diesel(primary_key(email))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Login identity, immutable.
    pub email: String,
    /// Argon2 PHC string.
    pub hash: String,
    /// `"user"` or `"admin"`.
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new account.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::account)]
pub struct NewAccount {
    pub email: String,
    pub hash: String,
    pub role: String,
}

impl NewAccount {
    /// A regular account.
    pub fn user(email: impl Into<String>, hash: String) -> Self {
        Self {
            email: email.into(),
            hash,
            role: String::from(ROLE_USER),
        }
    }

    /// An administrator. Only reachable from the operator tooling.
    pub fn admin(email: impl Into<String>, hash: String) -> Self {
        Self {
            email: email.into(),
            hash,
            role: String::from(ROLE_ADMIN),
        }
    }
}

impl AccountStore for DbConnection {
    fn create(&self, account: NewAccount) -> Result<Account> {
        let conn = &mut self.get()?;
        Ok(diesel::insert_into(dsl::account)
            .values(account)
            .returning(Account::as_returning())
            .get_result(conn)?)
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<Account>> {
        let conn = &mut self.get()?;
        Ok(dsl::account
            .find(email)
            .select(Account::as_select())
            .first(conn)
            .optional()?)
    }

    fn fetch_all(&self) -> Result<Vec<Account>> {
        let conn = &mut self.get()?;
        Ok(dsl::account
            .order(dsl::created_at.asc())
            .select(Account::as_select())
            .load(conn)?)
    }

    fn update_hash(&self, email: &str, hash: String) -> Result<Option<Account>> {
        let conn = &mut self.get()?;
        Ok(diesel::update(dsl::account.find(email))
            .set((dsl::hash.eq(hash), dsl::updated_at.eq(Utc::now())))
            .returning(Account::as_returning())
            .get_result(conn)
            .optional()?)
    }

    fn delete(&self, email: &str) -> Result<bool> {
        let conn = &mut self.get()?;
        Ok(diesel::delete(dsl::account.find(email)).execute(conn)? > 0)
    }
}
