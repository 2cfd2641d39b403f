use reqwest::{Method, StatusCode};
use serde_json::Value;

pub struct ApiClient {
    pub url: String,
    pub client: reqwest::Client,
}

impl ApiClient {
    fn path(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.url)
    }

    /// Sends a request and returns the status with the parsed body
    /// (`Value::Null` when the body is not JSON).
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut request = self.client.request(method, self.path(endpoint));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.expect("Failed to send http request");
        let status = response.status();
        let text = response.text().await.expect("Failed to get response text");
        (status, serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    pub async fn get(&self, endpoint: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, endpoint, token, None).await
    }

    pub async fn post(
        &self,
        endpoint: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        self.send(Method::POST, endpoint, token, Some(body)).await
    }

    pub async fn put(
        &self,
        endpoint: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        self.send(Method::PUT, endpoint, token, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, endpoint, token, None).await
    }

    /// POST with a raw, possibly malformed, JSON body.
    pub async fn post_raw(&self, endpoint: &str, body: &'static str) -> (StatusCode, Value) {
        self.send_raw(Method::POST, endpoint, None, body).await
    }

    pub async fn send_raw(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&str>,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let mut request = self
            .client
            .request(method, self.path(endpoint))
            .header("content-type", "application/json")
            .body(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.expect("Failed to send http request");
        let status = response.status();
        let text = response.text().await.expect("Failed to get response text");
        (status, serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}
