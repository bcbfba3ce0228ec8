//! Uniform `{data, isError, code}` response body.
//!
//! Every handler answers with an [`Envelope`], so clients can branch on
//! `isError` without inspecting the payload type.
//!
//! ```json
//! { "data": { "email": "admin", "role": "admin" }, "isError": false, "code": 200 }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON wrapper returned by every handler.
///
/// `code` always mirrors the HTTP status the envelope is written with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Payload, `null` on errors
    pub data: Option<T>,
    /// Whether the request failed
    pub is_error: bool,
    /// HTTP status code
    pub code: u16,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn ok(data: T, status: StatusCode) -> Self {
        Self {
            data: Some(data),
            is_error: false,
            code: status.as_u16(),
        }
    }

    /// Failed response with no payload.
    pub fn error(status: StatusCode) -> Self {
        Self {
            data: None,
            is_error: true,
            code: status.as_u16(),
        }
    }

    /// Status the envelope is written with.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_error: false,
            code: 0,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Shorthand for an error envelope response without payload type.
pub fn error_response(status: StatusCode) -> Response {
    Envelope::<()>::error(status).into_response()
}
