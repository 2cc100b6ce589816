//! User HTTP handlers.
//!
//! - POST /api/v1/users - Register
//! - POST /api/v1/sessions - Log in
//! - POST /api/v1/email_checkers - Check whether an email is still free
//! - POST /api/v1/users/avatars - Upload the current user's avatar
//! - GET /api/v1/users/fetch - Current user

use axum::{
    Extension,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
};

use crate::{
    error::{ApiError, AppError, ErrorData},
    formatters::user::UserResponse,
    handlers::MultipartForm,
    middleware::auth::CurrentUser,
    models::user::{CheckEmailInput, LoginInput, RegisterUserInput},
    response::{ApiResponse, EmailAvailability, UploadResult},
    state::AppState,
    storage::sanitize_file_name,
    validation::ValidatedJson,
};

/// Register a new account.
///
/// # Response
///
/// - **200**: the user with a fresh bearer token
/// - **422**: `{errors: {field: [..]}}` when the body is malformed or incomplete
/// - **400**: email already registered or storage failure
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<RegisterUserInput>, AppError>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    const FAILED: &str = "Register account failed";

    let ValidatedJson(input) = payload.map_err(|e| e.into_api(FAILED))?;

    let user = state
        .users
        .register_user(input)
        .await
        .map_err(|e| e.into_api(FAILED))?;

    let token = state
        .tokens
        .generate(user.id)
        .map_err(|e| e.into_api(FAILED))?;

    Ok(ApiResponse::success(
        "Account has been registered",
        UserResponse::new(user, token),
    ))
}

/// Log in with email and password.
///
/// Bad credentials answer 422 like validation errors, with the reason in
/// `data.errors` (`"No user found on that email"`, `"Wrong password"`).
pub async fn login(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<LoginInput>, AppError>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    const FAILED: &str = "Login failed";

    let ValidatedJson(input) = payload.map_err(|e| e.into_api(FAILED))?;

    let user = state.users.login(input).await.map_err(|e| {
        e.into_api_with_reason(FAILED)
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
    })?;

    let token = state
        .tokens
        .generate(user.id)
        .map_err(|e| e.into_api(FAILED))?;

    Ok(ApiResponse::success(
        "Successfully logged in",
        UserResponse::new(user, token),
    ))
}

pub async fn check_email_availability(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<CheckEmailInput>, AppError>,
) -> Result<ApiResponse<EmailAvailability>, ApiError> {
    const FAILED: &str = "Email checking failed";

    let ValidatedJson(input) = payload.map_err(|e| e.into_api(FAILED))?;

    let is_available = state
        .users
        .is_email_available(input)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "{}", FAILED);
            ApiError::new(
                FAILED,
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorData::Message {
                    errors: "Server error".to_string(),
                },
            )
        })?;

    let message = if is_available {
        "Email is available"
    } else {
        "Email has been registered"
    };

    Ok(ApiResponse::success(
        message,
        EmailAvailability { is_available },
    ))
}

/// Upload the avatar of the authenticated user.
///
/// Multipart field `avatar`. The file is stored as
/// `<upload dir>/<user id>-<file name>` and its public path recorded on the
/// user. Every failure answers 400 with `{is_uploaded: false}`; when the
/// field is missing nothing is written.
pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<UploadResult>, ApiError> {
    const FAILED: &str = "Failed to upload avatar image";
    let failed = |e: AppError| ApiError::upload_failed(FAILED, e);

    let multipart =
        multipart.map_err(|e| failed(AppError::invalid_field("body", e.body_text())))?;
    let mut form = MultipartForm::read(multipart).await.map_err(failed)?;

    let file = form
        .take_file("avatar")
        .ok_or_else(|| failed(AppError::invalid_field("avatar", "avatar is required")))?;
    let file_name = sanitize_file_name(&file.file_name)
        .ok_or_else(|| failed(AppError::invalid_field("avatar", "invalid file name")))?;

    let path = state
        .uploads
        .save(&format!("{}-{}", user.id, file_name), &file.data)
        .await
        .map_err(failed)?;

    state
        .users
        .save_avatar(user.id, &path)
        .await
        .map_err(failed)?;

    Ok(ApiResponse::success(
        "Avatar successfully uploaded",
        UploadResult { is_uploaded: true },
    ))
}

/// Return the authenticated user with a fresh token.
pub async fn fetch_user(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let token = state
        .tokens
        .generate(user.id)
        .map_err(|e| e.into_api("Failed to fetch user data"))?;

    Ok(ApiResponse::success(
        "Successfully fetched user data",
        UserResponse::new(user, token),
    ))
}
