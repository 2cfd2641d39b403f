//! Registration, login and account management handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use crm_auth::{auth_body::AuthBody, role::Role, secret_hash::hash_secret};
use crm_models::account::{Account, NewAccount};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    auth_token::{AuthToken, LoginRequest, authenticate, encode_token},
    ctx::Ctx,
    extract::{ApiJson, ApiPath},
    prelude::*,
    state::AppState,
};

/// Public view of an account. The hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountApi {
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<Account> for AccountApi {
    type Error = Error;

    fn try_from(account: Account) -> Result<Self> {
        Ok(Self {
            role: account.role.parse()?,
            email: account.email,
            created_at: account.created_at,
        })
    }
}

/// Registration body. Any other field, `role` included, is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Account update body. The password is the only writable field.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountUpdate {
    pub password: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountApi>)> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(Error::Validation(String::from(
            "Email and password are required.",
        )));
    }
    let hash = hash_secret(&payload.password)?;
    let account = state
        .accounts
        .create(NewAccount::user(payload.email, hash))
        .map_err(|err| Error::Validation(err.to_string()))?;
    info!("Registered account {}", account.email);
    Ok((StatusCode::CREATED, Json(account.try_into()?)))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthBody>> {
    let account = authenticate(&payload, state.accounts.as_ref())?;
    let claims = AuthToken::new(account.email, account.role.parse()?, Utc::now());
    let body = encode_token(&state.keys, &claims)?;
    info!("Account {} logged in", claims.sub);
    Ok(Json(body))
}

/// Admin only, enforced by the route layer.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AccountApi>>> {
    let accounts = state
        .accounts
        .fetch_all()?
        .into_iter()
        .map(AccountApi::try_from)
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(accounts))
}

/// Admin-or-self, enforced by the route layer.
pub async fn fetch(
    State(state): State<AppState>,
    ApiPath(email): ApiPath<String>,
) -> Result<Json<AccountApi>> {
    let account = state
        .accounts
        .fetch_by_email(&email)?
        .ok_or(Error::NotFound("User"))?;
    Ok(Json(account.try_into()?))
}

pub async fn update(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(email): ApiPath<String>,
    ApiJson(payload): ApiJson<AccountUpdate>,
) -> Result<Json<AccountApi>> {
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::Validation(String::from("Password is required.")))?;
    let hash = hash_secret(&password)?;
    let account = state
        .accounts
        .update_hash(&email, hash)?
        .ok_or(Error::NotFound("User"))?;
    info!("Account {} changed its password (by {})", account.email, ctx.email);
    Ok(Json(account.try_into()?))
}

pub async fn delete(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiPath(email): ApiPath<String>,
) -> Result<Json<Value>> {
    if !state.accounts.delete(&email)? {
        return Err(Error::NotFound("User"));
    }
    info!("Account {} deleted (by {})", email, ctx.email);
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
