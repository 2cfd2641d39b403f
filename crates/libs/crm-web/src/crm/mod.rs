//! CRUD handlers shared by the CRM resources.
//!
//! Each resource implements [`ApiResource`] to name itself, point at its
//! store and validate its creation payload. The handlers below are then
//! instantiated once per resource by [`routes`].

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use crm_models::store::{Resource, ResourceStore};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::info;
use uuid::Uuid;

use crate::{
    extract::{ApiJson, ApiPath, ApiQuery},
    prelude::*,
    state::AppState,
};

pub mod company;
pub mod contact;
pub mod deal;
pub mod ticket;

/// A [`Resource`] exposed over HTTP.
pub trait ApiResource: Resource {
    /// Creation payload as sent by clients, before validation.
    type Post: DeserializeOwned + Send;

    /// Display name, as in "Company not found".
    const NAME: &'static str;
    /// Key of the record in create and update responses.
    const KEY: &'static str;

    fn store(state: &AppState) -> &Arc<dyn ResourceStore<Self>>;

    /// Checks required fields and turns the payload into a new record.
    fn validate(post: Self::Post) -> Result<Self::New>;

    /// Rejects updates that would break what [`ApiResource::validate`]
    /// enforces on create.
    fn validate_patch(patch: &Self::Patch) -> Result<()>;
}

/// Routes for one resource, to be nested under its collection path.
pub fn routes<R: ApiResource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route("/{id}", get(fetch::<R>).put(update::<R>).delete(remove::<R>))
}

/// `{"message": ..., "<key>": record}`
fn saved<R: ApiResource>(verb: &str, record: &R) -> Result<Json<Value>> {
    let mut body = Map::new();
    body.insert(
        String::from("message"),
        Value::String(format!("{} {verb} successfully", R::NAME)),
    );
    body.insert(String::from(R::KEY), serde_json::to_value(record)?);
    Ok(Json(Value::Object(body)))
}

/// Missing or empty required field.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Any of `fields` sent as an empty string.
pub(crate) fn cleared(fields: &[&Option<String>]) -> bool {
    fields.iter().any(|field| field.as_deref() == Some(""))
}

pub async fn create<R: ApiResource>(
    State(state): State<AppState>,
    ApiJson(post): ApiJson<R::Post>,
) -> Result<(StatusCode, Json<Value>)> {
    let new = R::validate(post)?;
    let record = R::store(&state).create(new)?;
    info!("{} {} created", R::NAME, record.id());
    Ok((StatusCode::CREATED, saved("created", &record)?))
}

pub async fn list<R: ApiResource>(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<R::Filter>,
) -> Result<Json<Vec<R>>> {
    Ok(Json(R::store(&state).fetch_all(&filter)?))
}

pub async fn fetch<R: ApiResource>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<R>> {
    R::store(&state)
        .fetch_by_id(&id)?
        .map(Json)
        .ok_or(Error::NotFound(R::NAME))
}

pub async fn update<R: ApiResource>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<R::Patch>,
) -> Result<Json<Value>> {
    R::validate_patch(&patch)?;
    let record = R::store(&state)
        .update(&id, patch)?
        .ok_or(Error::NotFound(R::NAME))?;
    info!("{} {} updated", R::NAME, id);
    saved("updated", &record)
}

pub async fn remove<R: ApiResource>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    if !R::store(&state).delete(&id)? {
        return Err(Error::NotFound(R::NAME));
    }
    info!("{} {} deleted", R::NAME, id);
    Ok(Json(json!({ "message": format!("{} deleted successfully", R::NAME) })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_required_fields_are_missing() {
        assert_eq!(required(None), None);
        assert_eq!(required(Some(String::new())), None);
        assert_eq!(required(Some("x".into())), Some("x".into()));
    }

    #[test]
    fn only_empty_strings_are_cleared() {
        assert!(!cleared(&[&None, &Some("x".into())]));
        assert!(cleared(&[&None, &Some(String::new())]));
    }
}
