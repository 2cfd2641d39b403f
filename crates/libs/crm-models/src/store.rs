//! Store traits.
//!
//! The web layer only ever talks to these traits. [`crate::db::connection::DbConnection`]
//! implements them on PostgreSQL, [`crate::memory`] keeps everything in
//! process memory.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    account::{Account, NewAccount},
    prelude::*,
};

/// Credential store: persistence for accounts, keyed by email.
///
/// Every method is a single independent read or write. Uniqueness of the
/// email is enforced by the implementation.
pub trait AccountStore: Send + Sync {
    /// Inserts a new account. Fails if the email is already taken.
    fn create(&self, account: NewAccount) -> Result<Account>;

    fn fetch_by_email(&self, email: &str) -> Result<Option<Account>>;

    fn fetch_all(&self) -> Result<Vec<Account>>;

    /// Replaces the stored secret hash. `None` when no such account exists.
    fn update_hash(&self, email: &str, hash: String) -> Result<Option<Account>>;

    /// Permanently removes the account. Returns whether anything was deleted.
    fn delete(&self, email: &str) -> Result<bool>;
}

/// A CRM record with a server-assigned UUID.
///
/// `New` is the validated creation payload, `Patch` the allow-list of fields
/// an update may touch and `Filter` the list query.
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    type New: Send;
    type Patch: DeserializeOwned + Send;
    type Filter: DeserializeOwned + Send + Sync;

    fn id(&self) -> Uuid;

    /// Builds a fresh record with a new id and both timestamps set to `now`.
    fn create(new: Self::New, now: DateTime<Utc>) -> Self;

    /// Applies the allowed fields of `patch` and bumps `updated_at`.
    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Orders a filtered list the way `filter` asks for.
    fn sort(items: &mut [Self], filter: &Self::Filter);
}

/// Persistence for one kind of [`Resource`].
pub trait ResourceStore<R: Resource>: Send + Sync {
    fn create(&self, new: R::New) -> Result<R>;

    fn fetch_all(&self, filter: &R::Filter) -> Result<Vec<R>>;

    fn fetch_by_id(&self, id: &Uuid) -> Result<Option<R>>;

    /// `None` when no record has this id.
    fn update(&self, id: &Uuid, patch: R::Patch) -> Result<Option<R>>;

    fn delete(&self, id: &Uuid) -> Result<bool>;
}
