//! Access guards for protected routes.
//!
//! Every guard needs a resolved [`Ctx`]; a request without a valid token is
//! rejected with 401 before any role check. Role checks are plain
//! predicates over the token claims and never consult the store.

use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::Ctx;
use crate::{extract::ApiPath, prelude::*};

/// Middleware that requires a valid session token.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use crm_web::mw_auth::mw_require_auth;
///
/// let app: Router<()> = Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(axum::middleware::from_fn(mw_require_auth));
///
/// async fn protected_handler() -> &'static str {
///     "This requires authentication"
/// }
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}

/// Middleware that only lets administrators through.
pub async fn mw_require_admin(ctx: Ctx, req: Request, next: Next) -> Result<Response> {
    require_admin(&ctx)?;
    Ok(next.run(req).await)
}

/// Middleware that lets the caller through to `/{id}` only when `id` is
/// their own account or they are an administrator.
///
/// Runs before the handler reads the body, so a denied caller always gets
/// 403.
pub async fn mw_require_admin_or_self(
    ctx: Ctx,
    ApiPath(email): ApiPath<String>,
    req: Request,
    next: Next,
) -> Result<Response> {
    require_admin_or_self(&ctx, &email)?;
    Ok(next.run(req).await)
}

/// Whether `ctx` may act on the account identified by `email`.
pub fn is_admin_or_self(ctx: &Ctx, email: &str) -> bool {
    ctx.is_admin() || ctx.email == email
}

pub fn require_admin(ctx: &Ctx) -> Result<()> {
    if !ctx.is_admin() {
        return Err(Error::ApiForbidden);
    }
    Ok(())
}

pub fn require_admin_or_self(ctx: &Ctx, email: &str) -> Result<()> {
    if !is_admin_or_self(ctx, email) {
        return Err(Error::ApiForbidden);
    }
    Ok(())
}
