//! Error types and HTTP error response handling.
//!
//! Services and repositories return [`AppError`]. Handlers attach the
//! endpoint's failure message with [`AppError::into_api`], producing an
//! [`ApiError`] that renders the uniform envelope.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::response::{ApiResponse, UploadResult};

/// Validation messages keyed by the offending field.
///
/// Problems with the request body as a whole are reported under `body`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Infrastructure**: database, filesystem and hashing failures
/// - **Domain**: missing records, ownership and credential checks
/// - **Validation**: malformed or incomplete input, reported per field
/// - **Authentication**: missing or invalid bearer token
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Any `sqlx` failure (connection, query, decoding).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Writing an uploaded file failed.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// A blocking task (password hashing) panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Token signing failed: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    /// The named record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Requester is not the owner of the campaign they tried to read or modify.
    #[error("Not owner of the campaign")]
    NotOwner,

    #[error("Email has been registered")]
    EmailAlreadyRegistered,

    #[error("No user found on that email")]
    UnknownEmail,

    #[error("Wrong password")]
    WrongPassword,

    /// Input failed binding or validation.
    #[error("Invalid input")]
    Validation(FieldErrors),

    /// Bearer token missing, malformed, forged, or pointing to a deleted user.
    #[error("Unauthorized")]
    Unauthorized,
}

impl AppError {
    /// Shorthand for a single-field validation error.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(errors)
    }

    /// Whether the error message may be shown to clients.
    ///
    /// Infrastructure failures are logged but never described in responses.
    fn is_client_visible(&self) -> bool {
        !matches!(
            self,
            AppError::Database(_)
                | AppError::Storage(_)
                | AppError::PasswordHash(_)
                | AppError::Task(_)
                | AppError::TokenSigning(_)
        )
    }

    /// Convert into the default failure response of an endpoint.
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` → 422 with `{errors: {field: [..]}}`
    /// - `Unauthorized` → 401
    /// - everything else → 400 with `data: null`
    ///
    /// Not-found, not-owner and database failures look the same to the
    /// client; the cause only goes to the log.
    pub fn into_api(self, message: &'static str) -> ApiError {
        match self {
            AppError::Validation(errors) => ApiError::new(
                message,
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorData::FieldErrors { errors },
            ),
            AppError::Unauthorized => {
                ApiError::new("Unauthorized", StatusCode::UNAUTHORIZED, ErrorData::None)
            }
            err => {
                err.log(message);
                ApiError::new(message, StatusCode::BAD_REQUEST, ErrorData::None)
            }
        }
    }

    /// Like [`into_api`](Self::into_api), but domain errors carry their
    /// message as `{errors: "<message>"}`.
    ///
    /// Used where the client is expected to show the reason, such as bad
    /// login credentials. Infrastructure failures still answer `data: null`.
    pub fn into_api_with_reason(self, message: &'static str) -> ApiError {
        match self {
            err @ (AppError::Validation(_) | AppError::Unauthorized) => err.into_api(message),
            err if err.is_client_visible() => {
                err.log(message);
                ApiError::new(
                    message,
                    StatusCode::BAD_REQUEST,
                    ErrorData::Message {
                        errors: err.to_string(),
                    },
                )
            }
            err => err.into_api(message),
        }
    }

    fn log(&self, message: &str) {
        if self.is_client_visible() {
            tracing::warn!(error = %self, "{}", message);
        } else {
            tracing::error!(error = %self, "{}", message);
        }
    }
}

/// Payload of an error envelope.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorData {
    /// Serialized as `null`.
    None,
    FieldErrors { errors: FieldErrors },
    Message { errors: String },
    Upload(UploadResult),
}

/// A failure response ready to be rendered.
#[derive(Debug)]
pub struct ApiError {
    pub message: &'static str,
    pub status: StatusCode,
    pub data: ErrorData,
}

impl ApiError {
    pub fn new(message: &'static str, status: StatusCode, data: ErrorData) -> Self {
        Self {
            message,
            status,
            data,
        }
    }

    /// Override the status code, keeping message and payload.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Failure of an upload endpoint: always 400 with `{is_uploaded: false}`.
    pub fn upload_failed(message: &'static str, source: AppError) -> Self {
        tracing::warn!(error = %source, "{}", message);
        Self::new(
            message,
            StatusCode::BAD_REQUEST,
            ErrorData::Upload(UploadResult { is_uploaded: false }),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiResponse::error(self.message, self.status, self.data).into_response()
    }
}

/// Lets middleware and extractors reject with a bare `AppError`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_api("Request failed").into_response()
    }
}
