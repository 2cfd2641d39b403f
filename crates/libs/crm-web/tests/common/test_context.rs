use crm_auth::{jwt::JwtKeys, secret_hash::hash_secret};
use crm_models::account::NewAccount;
use crm_web::{router::serve, state::AppState};
use tokio::{net::TcpListener, sync::oneshot};

use super::{JWT_SECRET, api_client::ApiClient};

/// A server on an ephemeral port over a fresh in-memory store. Stopped when
/// dropped.
pub struct TestContext {
    pub api: ApiClient,
    pub state: AppState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestContext {
    pub async fn start() -> Self {
        let state = AppState::memory(JwtKeys::new(JWT_SECRET));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(serve(listener, state.clone(), async move {
            let _ = rx.await;
        }));

        Self {
            api: ApiClient {
                url: format!("http://{addr}"),
                client: reqwest::Client::new(),
            },
            state,
            shutdown: Some(tx),
        }
    }

    /// Adds an admin straight to the store, the way `crmd create-admin` does.
    pub fn seed_admin(&self, email: &str, password: &str) {
        let hash = hash_secret(password).expect("Failed to hash secret");
        self.state
            .accounts
            .create(NewAccount::admin(email, hash))
            .expect("Failed to seed admin");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
