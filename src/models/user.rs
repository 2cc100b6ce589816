//! User data models and request inputs.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::FieldErrors,
    validation::{Validate, Violations},
};

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. A user owns campaigns (`campaigns.user_id`)
/// and backs them (`transactions.user_id`).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub occupation: String,

    /// Unique across all users
    pub email: String,

    /// bcrypt hash, never serialized
    pub password_hash: String,

    /// Relative path of the stored avatar, e.g. `images/7-me.png`
    pub avatar_file_name: Option<String>,

    /// `user` for everyone registered through the API
    pub role: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values needed to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Request body of `POST /users`.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Jane Doe",
///   "occupation": "Engineer",
///   "email": "jane@example.com",
///   "password": "secret123"
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterUserInput {
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterUserInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        Violations::new()
            .required("name", &self.name)
            .required("occupation", &self.occupation)
            .required("email", &self.email)
            .email("email", &self.email)
            .required("password", &self.password)
            .min_len("password", &self.password, 6)
            .finish()
    }
}

/// Request body of `POST /sessions`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl Validate for LoginInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        Violations::new()
            .required("email", &self.email)
            .email("email", &self.email)
            .required("password", &self.password)
            .finish()
    }
}

/// Request body of `POST /email_checkers`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckEmailInput {
    pub email: String,
}

impl Validate for CheckEmailInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        Violations::new()
            .required("email", &self.email)
            .email("email", &self.email)
            .finish()
    }
}
