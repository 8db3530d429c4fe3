//! The uniform `{success, data | error}` response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Wire shape of every envelope.  Exactly one of `data` / `error` is present.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `{"success": true, "data": payload}` with `status` and a JSON content type.
pub fn write_success<T: Serialize>(status: StatusCode, payload: T) -> Response {
    let body = Envelope { success: true, data: Some(payload), error: None };
    (status, Json(body)).into_response()
}

/// `{"success": false, "error": message}` with `status` and a JSON content type.
pub fn write_failure(status: StatusCode, message: impl Into<String>) -> Response {
    let body: Envelope<()> = Envelope { success: false, data: None, error: Some(message.into()) };
    (status, Json(body)).into_response()
}
