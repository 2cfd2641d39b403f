//! Route table and server loop.

use std::future::Future;

use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use crm_models::crm::{company::Company, contact::Contact, deal::Deal, ticket::Ticket};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    account,
    crm::routes,
    ctx::resolver::mw_ctx_resolver,
    mw_auth::{mw_require_admin, mw_require_admin_or_self, mw_require_auth},
    prelude::*,
    state::AppState,
};

/// Builds the full API.
///
/// Every request passes through [`mw_ctx_resolver`]; the guards on each
/// group then decide whether the resolved caller may proceed.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/health", get(health));

    let admin_routes = Router::new()
        .route("/accounts", get(account::list))
        .route_layer(middleware::from_fn(mw_require_admin))
        .route_layer(middleware::from_fn(mw_require_auth));

    let account_routes = Router::new()
        .route(
            "/accounts/{id}",
            get(account::fetch)
                .put(account::update)
                .delete(account::delete),
        )
        .route_layer(middleware::from_fn(mw_require_admin_or_self))
        .route_layer(middleware::from_fn(mw_require_auth));

    let crm_routes = Router::new()
        .nest("/companies", routes::<Company>())
        .nest("/contacts", routes::<Contact>())
        .nest("/deals", routes::<Deal>())
        .nest("/tickets", routes::<Ticket>())
        .route_layer(middleware::from_fn(mw_require_auth));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(account_routes)
        .merge(crm_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            mw_ctx_resolver,
        ))
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
