//! Handler error type and its HTTP mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::{ErrorResponse, ValidationErrorResponse};

pub const STOCK_NOT_FOUND: &str = "Stock not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const MALFORMED_BODY: &str = "Malformed JSON body";

/// Failures a handler can report
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more trade fields failed validation
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Request body could not be parsed as JSON
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Ticker or stock id has no catalog entry
    #[error("stock not found")]
    StockNotFound,

    /// Anything else; details stay in the log
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::StockNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Validation(errors) => {
                warn!(?errors, "Trade submission rejected");
                (status, Json(ValidationErrorResponse { errors })).into_response()
            }
            Self::MalformedBody(reason) => {
                warn!(%reason, "Unparseable request body");
                (
                    status,
                    Json(ValidationErrorResponse {
                        errors: vec![MALFORMED_BODY.to_string()],
                    }),
                )
                    .into_response()
            }
            Self::StockNotFound => error_body(status, STOCK_NOT_FOUND),
            Self::Internal(e) => {
                error!("Request failed: {:#}", e);
                error_body(status, INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Single-message JSON error response
pub fn error_body(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
