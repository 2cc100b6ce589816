//! Campaign HTTP handlers.
//!
//! - GET /api/v1/campaigns?user_id= - List campaigns
//! - GET /api/v1/campaigns/{id} - Campaign detail
//! - POST /api/v1/campaigns - Create (authenticated)
//! - PUT /api/v1/campaigns/{id} - Update (owner only)
//! - POST /api/v1/campaign-images - Upload an image (owner only)

use axum::{
    Extension,
    extract::{
        Multipart, Path, Query, State,
        multipart::MultipartRejection,
        rejection::{PathRejection, QueryRejection},
    },
};

use crate::{
    error::{ApiError, AppError},
    formatters::campaign::{CampaignDetailResponse, CampaignResponse},
    handlers::{MultipartForm, path_id},
    middleware::auth::CurrentUser,
    models::campaign::{CampaignInput, CampaignListQuery},
    response::{ApiResponse, UploadResult},
    state::AppState,
    storage::sanitize_file_name,
    validation::ValidatedJson,
};

/// List campaigns, optionally only those of `user_id`.
///
/// A non-positive `user_id` lists every campaign.
pub async fn list_campaigns(
    State(state): State<AppState>,
    query: Result<Query<CampaignListQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<CampaignResponse>>, ApiError> {
    const FAILED: &str = "Error to get campaigns";

    let Query(query) = query
        .map_err(|e| AppError::invalid_field("user_id", e.body_text()).into_api(FAILED))?;

    let campaigns = state
        .campaigns
        .get_campaigns(query.user_id)
        .await
        .map_err(|e| e.into_api(FAILED))?;

    Ok(ApiResponse::success(
        "List of campaigns",
        campaigns.into_iter().map(CampaignResponse::from).collect(),
    ))
}

pub async fn get_campaign(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<CampaignDetailResponse>, ApiError> {
    const FAILED: &str = "Failed to get detail of campaign";

    let campaign_id = path_id(path, FAILED)?;

    let detail = state
        .campaigns
        .get_campaign_detail(campaign_id)
        .await
        .map_err(|e| e.into_api(FAILED))?;

    Ok(ApiResponse::success(
        "Campaign detail",
        CampaignDetailResponse::from(detail),
    ))
}

/// Create a campaign owned by the authenticated user.
pub async fn create_campaign(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<ValidatedJson<CampaignInput>, AppError>,
) -> Result<ApiResponse<CampaignResponse>, ApiError> {
    const FAILED: &str = "Failed to create campaign";

    let ValidatedJson(input) = payload.map_err(|e| e.into_api(FAILED))?;

    let campaign = state
        .campaigns
        .create_campaign(input, user.id)
        .await
        .map_err(|e| e.into_api(FAILED))?;

    Ok(ApiResponse::success(
        "Success to create campaign",
        CampaignResponse::new(campaign, None),
    ))
}

/// Replace the editable fields of a campaign.
///
/// Non-owners get the generic 400 failure envelope.
pub async fn update_campaign(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<ValidatedJson<CampaignInput>, AppError>,
) -> Result<ApiResponse<CampaignResponse>, ApiError> {
    const FAILED: &str = "Failed to update campaign";

    let campaign_id = path_id(path, FAILED)?;
    let ValidatedJson(input) = payload.map_err(|e| e.into_api(FAILED))?;

    let campaign = state
        .campaigns
        .update_campaign(campaign_id, input, user.id)
        .await
        .map_err(|e| e.into_api(FAILED))?;

    Ok(ApiResponse::success(
        "Success to update campaign",
        CampaignResponse::new(campaign, None),
    ))
}

/// Upload an image for a campaign the authenticated user owns.
///
/// Multipart fields: `campaign_id`, `is_primary` (`true`, `1` or `on`) and
/// `file`. Missing or malformed form fields answer 422; every other failure
/// answers 400 with `{is_uploaded: false}`. Ownership is checked before the
/// file is written.
pub async fn upload_campaign_image(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<UploadResult>, ApiError> {
    const FAILED: &str = "Failed to upload campaign image";
    let failed = |e: AppError| ApiError::upload_failed(FAILED, e);

    let multipart =
        multipart.map_err(|e| AppError::invalid_field("body", e.body_text()).into_api(FAILED))?;
    let mut form = MultipartForm::read(multipart)
        .await
        .map_err(|e| e.into_api(FAILED))?;

    let campaign_id = form
        .text("campaign_id")
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            AppError::invalid_field("campaign_id", "campaign_id must be a positive integer")
                .into_api(FAILED)
        })?;
    let is_primary = form.text("is_primary").is_some_and(parse_flag);

    let file = form.take_file("file").ok_or_else(|| {
        AppError::invalid_field("file", "file is required").into_api(FAILED)
    })?;
    let file_name = sanitize_file_name(&file.file_name).ok_or_else(|| {
        AppError::invalid_field("file", "file name is not usable").into_api(FAILED)
    })?;

    state
        .campaigns
        .get_owned_campaign(campaign_id, user.id)
        .await
        .map_err(failed)?;

    let path = state
        .uploads
        .save(&format!("campaign-{campaign_id}-{file_name}"), &file.data)
        .await
        .map_err(failed)?;

    state
        .campaigns
        .save_campaign_image(campaign_id, user.id, &path, is_primary)
        .await
        .map_err(failed)?;

    Ok(ApiResponse::success(
        "Campaign image successfully uploaded",
        UploadResult { is_uploaded: true },
    ))
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "on")
}
