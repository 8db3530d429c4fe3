//! HTTP-facing error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use engine::EngineError;

use crate::envelope::write_failure;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The body could not be decoded into the expected request.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Workflow(#[from] EngineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidBody(detail) => {
                warn!(%detail, "Rejected request body");
                write_failure(StatusCode::BAD_REQUEST, "Invalid request body")
            }
            ApiError::Workflow(e) => {
                error!(%e, "Squad workflow failed");
                write_failure(StatusCode::INTERNAL_SERVER_ERROR, e.public_message())
            }
        }
    }
}
