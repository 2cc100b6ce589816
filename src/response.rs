//! Uniform JSON envelope returned by every endpoint.
//!
//! ```json
//! {
//!   "meta": { "message": "Account has been registered", "code": 200, "status": "success" },
//!   "data": { ... }
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Outcome label carried in `meta.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct Meta {
    pub message: String,
    pub code: u16,
    pub status: ResponseStatus,
}

/// Envelope around a typed payload.
///
/// The HTTP status of the response always equals `meta.code`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub meta: Meta,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with a success envelope.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            meta: Meta {
                message: message.into(),
                code: StatusCode::OK.as_u16(),
                status: ResponseStatus::Success,
            },
            data,
        }
    }

    /// Error envelope with an explicit status code.
    pub fn error(message: impl Into<String>, status: StatusCode, data: T) -> Self {
        Self {
            meta: Meta {
                message: message.into(),
                code: status.as_u16(),
                status: ResponseStatus::Error,
            },
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.meta.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}

/// Payload of `POST /email_checkers`.
#[derive(Debug, Serialize)]
pub struct EmailAvailability {
    pub is_available: bool,
}

/// Payload of the upload endpoints, on success and on failure.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub is_uploaded: bool,
}
