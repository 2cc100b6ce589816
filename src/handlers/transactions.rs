//! Transaction HTTP handlers.
//!
//! - GET /api/v1/campaigns/{id}/transactions - Backers of a campaign (owner only)
//! - GET /api/v1/transactions - Contributions of the authenticated user
//! - POST /api/v1/transactions - Back a campaign

use axum::{
    Extension,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    error::{ApiError, AppError},
    formatters::transaction::{
        CampaignTransactionResponse, TransactionResponse, UserTransactionResponse,
    },
    handlers::path_id,
    middleware::auth::CurrentUser,
    models::transaction::CreateTransactionInput,
    response::ApiResponse,
    state::AppState,
    validation::ValidatedJson,
};

/// List the transactions of a campaign.
///
/// # Response (200)
///
/// ```json
/// {
///   "meta": { "message": "Campaign's transactions", "code": 200, "status": "success" },
///   "data": [
///     { "id": 3, "name": "Budi", "amount": 250000, "created_at": "2025-12-21T16:00:00Z" }
///   ]
/// }
/// ```
///
/// When the requester does not own the campaign, or it does not exist, the
/// answer is 400 with `data: null` and no transaction is read.
pub async fn get_campaign_transactions(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Vec<CampaignTransactionResponse>>, ApiError> {
    const FAILED: &str = "Failed to get campaign's transaction";

    let campaign_id = path_id(path, FAILED)?;

    let transactions = state
        .transactions
        .get_transactions_by_campaign_id(campaign_id, user.id)
        .await
        .map_err(|e| e.into_api(FAILED))?;

    Ok(ApiResponse::success(
        "Campaign's transactions",
        transactions
            .into_iter()
            .map(CampaignTransactionResponse::from)
            .collect(),
    ))
}

pub async fn get_user_transactions(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiResponse<Vec<UserTransactionResponse>>, ApiError> {
    const FAILED: &str = "Failed to get user's transactions";

    let transactions = state
        .transactions
        .get_transactions_by_user_id(user.id)
        .await
        .map_err(|e| e.into_api(FAILED))?;

    Ok(ApiResponse::success(
        "User's transactions",
        transactions
            .into_iter()
            .map(UserTransactionResponse::from)
            .collect(),
    ))
}

/// Back a campaign as the authenticated user.
///
/// # Request Body
///
/// ```json
/// { "campaign_id": 42, "amount": 250000 }
/// ```
///
/// The transaction starts as `pending`.
pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<ValidatedJson<CreateTransactionInput>, AppError>,
) -> Result<ApiResponse<TransactionResponse>, ApiError> {
    const FAILED: &str = "Failed to create transaction";

    let ValidatedJson(input) = payload.map_err(|e| e.into_api(FAILED))?;

    let transaction = state
        .transactions
        .create_transaction(input, user.id)
        .await
        .map_err(|e| e.into_api(FAILED))?;

    Ok(ApiResponse::success(
        "Success to create transaction",
        TransactionResponse::from(transaction),
    ))
}
