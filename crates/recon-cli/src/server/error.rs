//! API error types and handling.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recon::ReconError;
use serde::Serialize;

/// Returned when a form arrives without both files and a primary key.
pub const MISSING_INPUT_MESSAGE: &str = "Missing files or key column.";

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Required upload fields were absent or empty.
    MissingInput,
    /// Bad request from client.
    BadRequest(String),
    /// The multipart body could not be read (including oversize uploads).
    Multipart(MultipartError),
    /// Internal server error.
    Internal(String),
    /// Error from the reconciliation library.
    Recon(ReconError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingInput | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Multipart(e) => e.status(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Recon(e) if e.is_user_error() => StatusCode::BAD_REQUEST,
            ApiError::Recon(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingInput => "missing_input",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Multipart(_) => "invalid_upload",
            ApiError::Internal(_) => "internal",
            ApiError::Recon(e) if e.is_user_error() => "missing_key_column",
            ApiError::Recon(_) => "processing_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.kind().to_string(),
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<ReconError> for ApiError {
    fn from(err: ReconError) -> Self {
        ApiError::Recon(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Multipart(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingInput => write!(f, "{}", MISSING_INPUT_MESSAGE),
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
            ApiError::Multipart(e) => write!(f, "Invalid upload: {}", e.body_text()),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Recon(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// Plain-text rendering of [`ApiError`] for the browser form route.
#[derive(Debug)]
pub struct PlainTextError(pub ApiError);

impl IntoResponse for PlainTextError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let body = match &self.0 {
            ApiError::Recon(e) if !e.is_user_error() => {
                tracing::error!(error = %e, "form reconciliation failed");
                format!("Error processing files: {}", e)
            }
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

impl From<ApiError> for PlainTextError {
    fn from(err: ApiError) -> Self {
        PlainTextError(err)
    }
}
