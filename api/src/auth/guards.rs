use std::net::IpAddr;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::{AuthContext, ClientIp};
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller's API key. Header names are case-insensitive.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authenticates the request by API key and, when the key is pinned, by source address.
///
/// Runs before method dispatch, so every request on the guarded routes is checked,
/// including ones that end up as `405`.
///
/// ### Failures
/// - `401 Missing API key` → header absent or blank; no store is consulted
/// - `403 Invalid API key` → unknown or disabled key
/// - `403 Unauthorized IP` → key is bound to a different address
///
/// On success an [`AuthContext`] is inserted into the request extensions, and copied
/// onto the response so outer layers (the access log) can see which key was used.
pub async fn require_api_key(
    State(app_state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(ApiError::MissingApiKey)?
        .to_owned();

    let Some(record) = app_state.api_keys().lookup_by_key(&key).await? else {
        warn!(ip = %client_ip, "Rejected unknown API key");
        return Err(ApiError::InvalidApiKey);
    };

    if let Some(bound) = record.bound_ip() {
        if !ip_matches(bound, client_ip) {
            warn!(
                api_key_id = record.id,
                bound_ip = bound,
                ip = %client_ip,
                "Rejected API key from unbound address"
            );
            return Err(ApiError::IpMismatch);
        }
    }

    let bound_ip = record.bound_ip().map(str::to_owned);
    let ctx = AuthContext {
        api_key: record.key,
        api_key_id: record.id,
        bound_ip,
    };
    req.extensions_mut().insert(ctx.clone());

    let mut response = next.run(req).await;
    response.extensions_mut().insert(ctx);
    Ok(response)
}

/// Compares a stored address against the peer. Unparseable stored values are
/// compared literally; an unknown peer never matches.
fn ip_matches(bound: &str, client: IpAddr) -> bool {
    if client.is_unspecified() {
        return false;
    }
    match bound.parse::<IpAddr>() {
        Ok(ip) => ip.to_canonical() == client,
        Err(_) => bound == client.to_string(),
    }
}
