//! Error type returned by every ticket operation.
//!
//! Each variant carries its HTTP code. The response body is always
//! `{ "error": "<message>" }` with a JSON content type, whatever the failure.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::StoreError;
use util::config;

use crate::response::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Unauthorized IP")]
    IpMismatch,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request body could not be read (too large, truncated, ...).
    #[error("{message}")]
    Body { code: u16, message: String },

    /// A collaborator refused the operation; the message is shown to the client as-is.
    #[error("{0}")]
    Operation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn code(&self) -> u16 {
        match self {
            ApiError::MissingApiKey => 401,
            ApiError::InvalidApiKey | ApiError::IpMismatch => 403,
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::UnprocessableEntity(_) => 422,
            ApiError::MethodNotAllowed => 405,
            ApiError::Body { code, .. } => *code,
            ApiError::Operation(_) | ApiError::Store(_) => 500,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Store(_) if config::is_production() => "Internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Body {
            code: rejection.status().as_u16(),
            message: rejection.body_text(),
        }
    }
}

/// Maps a numeric error code onto an HTTP status. Codes outside 100..=599 become 500.
pub fn status_for_code(code: i64) -> StatusCode {
    u16::try_from(code)
        .ok()
        .filter(|code| (100..=599).contains(code))
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for_code(i64::from(self.code()));

        if status.is_server_error() {
            tracing::error!(code = status.as_u16(), error = %self, "Request failed");
        }

        (status, Json(ErrorResponse::new(self.client_message()))).into_response()
    }
}
