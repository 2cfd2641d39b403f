#![allow(dead_code)]

use serde_json::{Value, json};

use api_client::ApiClient;

pub mod api_client;
pub mod test_context;

pub const JWT_SECRET: &[u8] = b"integration-test-secret";

/// Registers `email` and returns its session token.
pub async fn register_and_login(api: &ApiClient, email: &str, password: &str) -> String {
    let (status, _) = api
        .post("register", None, &json!({ "email": email, "password": password }))
        .await;
    assert_eq!(status, 201, "registering {email}");
    login(api, email, password).await
}

pub async fn login(api: &ApiClient, email: &str, password: &str) -> String {
    let (status, body) = api
        .post("login", None, &json!({ "email": email, "password": password }))
        .await;
    assert_eq!(status, 200, "logging in {email}: {body}");
    token_of(&body)
}

pub fn token_of(body: &Value) -> String {
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}
