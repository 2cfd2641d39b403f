//! Shared router state.

use std::sync::Arc;

use crm_auth::jwt::JwtKeys;
use crm_models::{
    crm::{company::Company, contact::Contact, deal::Deal, ticket::Ticket},
    memory::{MemoryAccounts, MemoryTable},
    store::{AccountStore, ResourceStore},
};

/// Store handles and signing keys, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub companies: Arc<dyn ResourceStore<Company>>,
    pub contacts: Arc<dyn ResourceStore<Contact>>,
    pub deals: Arc<dyn ResourceStore<Deal>>,
    pub tickets: Arc<dyn ResourceStore<Ticket>>,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    /// State backed by a single store that holds every table, such as
    /// [`crm_models::db::connection::DbConnection`].
    pub fn with_store<S>(store: S, keys: JwtKeys) -> Self
    where
        S: AccountStore
            + ResourceStore<Company>
            + ResourceStore<Contact>
            + ResourceStore<Deal>
            + ResourceStore<Ticket>
            + 'static,
    {
        let store = Arc::new(store);
        Self {
            accounts: store.clone(),
            companies: store.clone(),
            contacts: store.clone(),
            deals: store.clone(),
            tickets: store,
            keys: Arc::new(keys),
        }
    }

    /// Fresh, empty in-memory state.
    pub fn memory(keys: JwtKeys) -> Self {
        Self {
            accounts: Arc::new(MemoryAccounts::new()),
            companies: Arc::new(MemoryTable::<Company>::new()),
            contacts: Arc::new(MemoryTable::<Contact>::new()),
            deals: Arc::new(MemoryTable::<Deal>::new()),
            tickets: Arc::new(MemoryTable::<Ticket>::new()),
            keys: Arc::new(keys),
        }
    }
}
