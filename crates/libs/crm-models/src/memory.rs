//! In-process stores.
//!
//! Used by `CRM_STORE=memory` and by the HTTP tests. Each store is a
//! mutex-guarded vector, so every operation is atomic on its own and
//! insertion order is the default list order, matching the database
//! implementation.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::{
    account::{Account, NewAccount},
    prelude::*,
    store::{AccountStore, Resource, ResourceStore},
};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| Error::Poisoned)
}

/// Accounts keyed by email.
#[derive(Debug, Default)]
pub struct MemoryAccounts {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for MemoryAccounts {
    fn create(&self, account: NewAccount) -> Result<Account> {
        let mut accounts = lock(&self.accounts)?;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(Error::Duplicate(format!(
                "account '{}' already exists",
                account.email
            )));
        }
        let now = Utc::now();
        let account = Account {
            email: account.email,
            hash: account.hash,
            role: account.role,
            created_at: now,
            updated_at: now,
        };
        debug!("Stored account {}", account.email);
        accounts.push(account.clone());
        Ok(account)
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(lock(&self.accounts)?
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    fn fetch_all(&self) -> Result<Vec<Account>> {
        Ok(lock(&self.accounts)?.clone())
    }

    fn update_hash(&self, email: &str, hash: String) -> Result<Option<Account>> {
        let mut accounts = lock(&self.accounts)?;
        Ok(accounts.iter_mut().find(|a| a.email == email).map(|account| {
            account.hash = hash;
            account.updated_at = Utc::now();
            account.clone()
        }))
    }

    fn delete(&self, email: &str) -> Result<bool> {
        let mut accounts = lock(&self.accounts)?;
        let before = accounts.len();
        accounts.retain(|a| a.email != email);
        Ok(accounts.len() < before)
    }
}

/// Records of one resource kind.
#[derive(Debug)]
pub struct MemoryTable<R> {
    rows: Mutex<Vec<R>>,
}

impl<R> Default for MemoryTable<R> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<R> MemoryTable<R> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: Resource> ResourceStore<R> for MemoryTable<R> {
    fn create(&self, new: R::New) -> Result<R> {
        let row = R::create(new, Utc::now());
        lock(&self.rows)?.push(row.clone());
        Ok(row)
    }

    fn fetch_all(&self, filter: &R::Filter) -> Result<Vec<R>> {
        let mut rows: Vec<R> = lock(&self.rows)?
            .iter()
            .filter(|row| row.matches(filter))
            .cloned()
            .collect();
        R::sort(&mut rows, filter);
        Ok(rows)
    }

    fn fetch_by_id(&self, id: &Uuid) -> Result<Option<R>> {
        Ok(lock(&self.rows)?.iter().find(|row| row.id() == *id).cloned())
    }

    fn update(&self, id: &Uuid, patch: R::Patch) -> Result<Option<R>> {
        let mut rows = lock(&self.rows)?;
        Ok(rows.iter_mut().find(|row| row.id() == *id).map(|row| {
            row.apply(patch, Utc::now());
            row.clone()
        }))
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut rows = lock(&self.rows)?;
        let before = rows.len();
        rows.retain(|row| row.id() != *id);
        Ok(rows.len() < before)
    }
}
