//! Request binding and validation.
//!
//! [`ValidatedJson`] deserializes a JSON body and runs the input's
//! [`Validate`] rules. Any failure, from a syntax error to a missing field,
//! becomes [`AppError::Validation`] so handlers can answer 422 instead of
//! letting axum pick a status.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{AppError, FieldErrors};

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
}

/// Field-level rules of a request input.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Collects violations field by field.
#[derive(Debug, Default)]
pub struct Violations(FieldErrors);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
        self
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, format!("{field} is required"));
        }
        self
    }

    /// Only checked when a value is present; emptiness is `required`'s job.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.trim().is_empty() && !EMAIL_RE.is_match(value.trim()) {
            self.add(field, format!("{field} must be a valid email address"));
        }
        self
    }

    pub fn min_len(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if !value.is_empty() && value.chars().count() < min {
            self.add(field, format!("{field} must be at least {min} characters"));
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: i64) -> &mut Self {
        if value <= 0 {
            self.add(field, format!("{field} must be greater than zero"));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), FieldErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.0))
        }
    }
}

/// JSON body extractor that also validates.
///
/// Take it as `Result<ValidatedJson<T>, AppError>` to choose the failure
/// message in the handler.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_errors)?;

        value.validate().map_err(AppError::Validation)?;

        Ok(Self(value))
    }
}

fn rejection_errors(rejection: JsonRejection) -> AppError {
    AppError::invalid_field("body", rejection.body_text())
}
