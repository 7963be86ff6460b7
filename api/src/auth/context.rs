/// Caller identity established by [`require_api_key`](crate::auth::guards::require_api_key).
///
/// Lives in the request extensions for the rest of the request; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub api_key: String,
    pub api_key_id: i64,
    pub bound_ip: Option<String>,
}
