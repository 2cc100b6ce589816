//! User service: registration, credentials and profile updates.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::user::{CheckEmailInput, LoginInput, NewUser, RegisterUserInput, User},
    repositories::UserRepository,
};

const DEFAULT_ROLE: &str = "user";

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hash_cost: u32,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hash_cost: u32) -> Self {
        Self {
            repository,
            hash_cost,
        }
    }

    /// Register a new user with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// - `EmailAlreadyRegistered`: another user has this email
    /// - `PasswordHash` / `Database`: infrastructure failures
    pub async fn register_user(&self, input: RegisterUserInput) -> Result<User, AppError> {
        let email = input.email.trim().to_string();

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyRegistered);
        }

        let password_hash = hash_password(input.password, self.hash_cost).await?;

        let user = self
            .repository
            .create(NewUser {
                name: input.name.trim().to_string(),
                occupation: input.occupation.trim().to_string(),
                email,
                password_hash,
                role: DEFAULT_ROLE.to_string(),
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Find the user by email and check the password.
    ///
    /// # Errors
    ///
    /// - `UnknownEmail`: nobody registered with this email
    /// - `WrongPassword`: the password does not match the stored hash
    pub async fn login(&self, input: LoginInput) -> Result<User, AppError> {
        let user = self
            .repository
            .find_by_email(input.email.trim())
            .await?
            .ok_or(AppError::UnknownEmail)?;

        if !verify_password(input.password, user.password_hash.clone()).await? {
            return Err(AppError::WrongPassword);
        }

        Ok(user)
    }

    /// `true` when no user is registered with the email.
    pub async fn is_email_available(&self, input: CheckEmailInput) -> Result<bool, AppError> {
        let user = self.repository.find_by_email(input.email.trim()).await?;

        Ok(user.is_none())
    }

    /// Record the stored avatar path on the user.
    pub async fn save_avatar(&self, user_id: i64, file_name: &str) -> Result<User, AppError> {
        let user = self.repository.update_avatar(user_id, file_name).await?;

        tracing::info!(user_id, file_name, "Avatar updated");
        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound("User"))
    }
}

/// bcrypt is CPU bound; run it on the blocking pool, not on a runtime worker.
async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    Ok(tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
}
