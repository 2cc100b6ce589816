//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the token from the Authorization header
//! 2. Verify its signature and recover the user ID
//! 3. Load the user and attach it to the request as [`CurrentUser`]
//! 4. Reject anything else with HTTP 401, or 503 when the user store is down

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::{
    error::{ApiError, AppError, ErrorData},
    models::user::User,
    state::AppState,
};

/// The authenticated user of a request.
///
/// Inserted into the request extensions by [`auth_middleware`]; handlers
/// take it as `Extension(CurrentUser(user))`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// # Headers
///
/// ```text
/// Authorization: Bearer 7.5f0c...e1.9a4b...
/// ```
///
/// # Returns
///
/// - `Ok(Response)` from the next handler when the token is valid and the user exists
/// - 401 when the token is missing, invalid, expired or its user is gone
/// - 503 when the user cannot be loaded
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;

    let user_id = state
        .tokens
        .validate(token.trim())
        .map_err(|_| unauthorized())?;

    // Token may outlive its user
    let user = match state.users.get_user_by_id(user_id).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return Err(unauthorized()),
        Err(e) => {
            tracing::error!(error = %e, user_id, "Failed to load authenticated user");
            return Err(ApiError::new(
                "Authentication unavailable",
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorData::None,
            ));
        }
    };

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

fn unauthorized() -> ApiError {
    AppError::Unauthorized.into_api("Unauthorized")
}
