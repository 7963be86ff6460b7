//! Ticket resource: `/api/v1/tickets`.
//!
//! One path serves the whole collection. The HTTP method selects the operation:
//!
//! | Method        | Operation                  |
//! |---------------|----------------------------|
//! | `GET`         | [`get::list_tickets`]      |
//! | `POST`        | [`post::create_ticket`]    |
//! | `PUT`/`PATCH` | [`put::update_ticket`]     |
//! | `DELETE`      | [`delete::delete_ticket`]  |
//!
//! Anything else (including `HEAD`) is answered with `405`. Every request passes
//! the API-key guard first. Bodies are only read for `POST`, `PUT` and `PATCH`;
//! an unreadable or oversized body becomes a JSON error like any other failure.

use std::collections::HashMap;

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State, rejection::BytesRejection},
    http::Method,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::any,
};

use crate::auth::{ClientIp, guards::require_api_key};
use crate::error::ApiError;
use crate::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn tickets_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", any(dispatch))
        .route_layer(from_fn_with_state(app_state, require_api_key))
}

async fn dispatch(
    State(app_state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    match method {
        Method::GET => get::list_tickets(&app_state, &params)
            .await
            .map(IntoResponse::into_response),
        Method::POST => post::create_ticket(&app_state, client_ip, &body?)
            .await
            .map(IntoResponse::into_response),
        Method::PUT | Method::PATCH => put::update_ticket(&app_state, &params, &body?)
            .await
            .map(IntoResponse::into_response),
        Method::DELETE => delete::delete_ticket(&app_state, &params)
            .await
            .map(IntoResponse::into_response),
        _ => Err(ApiError::MethodNotAllowed),
    }
}
