use std::time::Instant;

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::TypedHeader;
use headers::{Origin, UserAgent};
use tracing::{info, warn};

use crate::auth::{AuthContext, ClientIp};

/// Access log for the API: one line per request, written once the response is known.
///
/// The line carries the peer address, status and latency, plus the id of the API key
/// the guard accepted (read from the response extensions, absent for rejected or
/// unauthenticated requests). Failed requests are logged at `warn`. CORS preflight
/// `OPTIONS` requests are not logged.
///
/// ### Usage:
/// ```ignore
/// use axum::Router;
/// use axum::middleware::from_fn;
/// use api::auth::middleware::log_request;
///
/// let app = Router::new().layer(from_fn(log_request));
/// ```
pub async fn log_request(ClientIp(ip): ClientIp, req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();

    let origin = TypedHeader::<Origin>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(o)| o.to_string());
    let user_agent = TypedHeader::<UserAgent>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(ua)| ua.to_string());

    let started = Instant::now();
    let response = next.run(Request::from_parts(parts, body)).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let status = response.status();
    let api_key_id = response
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.api_key_id);
    let origin = origin.as_deref().unwrap_or("unknown");
    let user_agent = user_agent.as_deref().unwrap_or("unknown");

    if status.is_client_error() || status.is_server_error() {
        warn!(
            %method, path = %path, %ip, status = status.as_u16(), elapsed_ms, api_key_id, origin, user_agent,
            "Request failed"
        );
    } else {
        info!(
            %method, path = %path, %ip, status = status.as_u16(), elapsed_ms, api_key_id, origin, user_agent,
            "Request completed"
        );
    }

    response
}
