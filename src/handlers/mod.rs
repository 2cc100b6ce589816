//! HTTP request handlers (route handlers).
//!
//! Each handler:
//! 1. Binds the request (JSON body, path, multipart form) into a typed input
//! 2. Calls one service operation
//! 3. Formats the result into the uniform envelope
//!
//! Handlers never hold business rules; they only choose the failure message
//! and status of their endpoint.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Multipart, Path, rejection::PathRejection},
    http::StatusCode,
};

use crate::error::{ApiError, AppError};

/// Campaign listing, detail, create, update and image upload endpoints
pub mod campaigns;
/// Liveness endpoint
pub mod health;
/// Transaction listing and creation endpoints
pub mod transactions;
/// Registration, sessions, email checks and avatars
pub mod users;

/// Bind a numeric `{id}` path segment, answering 400 on failure.
pub(crate) fn path_id(
    path: Result<Path<i64>, PathRejection>,
    message: &'static str,
) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        AppError::invalid_field("id", rejection.body_text())
            .into_api(message)
            .with_status(StatusCode::BAD_REQUEST)
    })
}

/// A file part of a multipart form.
#[derive(Debug)]
pub(crate) struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// A fully read multipart form: text parts and file parts by field name.
#[derive(Debug, Default)]
pub(crate) struct MultipartForm {
    text: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_field("body", e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::invalid_field(&name, e.body_text()))?;
                    form.files.insert(name, UploadedFile { file_name, data });
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::invalid_field(&name, e.body_text()))?;
                    form.text.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
