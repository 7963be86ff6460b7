//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/v1/tickets` → ticket resource, guarded by `X-Api-Key`

use axum::{Router, middleware::from_fn, routing::get};

use crate::auth::middleware::log_request;
use crate::routes::{health::health_check, tickets::tickets_routes};
use crate::state::AppState;

pub mod health;
pub mod tickets;

/// Builds the `/api` router with `AppState` applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(tickets_routes(app_state.clone()))
        .with_state(app_state)
}

/// The full application: `/api` routes plus request logging.
///
/// The caller adds CORS and serves it with connect info so the API-key guard
/// can see the peer address.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
}
