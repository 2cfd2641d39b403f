//! Context resolver for extracting the caller from HTTP requests.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use crm_auth::{AUTH_HEADER, AUTH_HEADER_PREFIX};

use crate::{auth_token::decode_token, ctx::Ctx, prelude::*, state::AppState};

/// Pulls the bearer token out of the `Authorization` header.
///
/// A missing header, another scheme or an empty token all count as no
/// token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Middleware for resolving request context from authentication tokens.
///
/// Verifies the bearer token, if any, and adds the resulting
/// `Result<Ctx, crm_auth::error::Error>` to the request extensions. It never
/// rejects a request itself; that is up to the guards in
/// [`crate::mw_auth`].
#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = bearer_token(&headers)
        .ok_or(crm_auth::error::Error::TokenMissing)
        .and_then(|token| decode_token(&state.keys, token, Utc::now()))
        .map(Ctx::from);

    req.extensions_mut().insert(ctx);

    next.run(req).await
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<std::result::Result<Ctx, crm_auth::error::Error>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn reads_bearer_scheme_only() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
