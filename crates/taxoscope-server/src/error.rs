//! HTTP mapping for core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use taxoscope_core::error::{ErrorCode, TaxoscopeError};

/// Error returned from HTTP handlers.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub TaxoscopeError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = match code {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Config
            | ErrorCode::Source
            | ErrorCode::Render
            | ErrorCode::UnsupportedVersion
            | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
