//! Campaign service: listings, detail, creation and owner-only edits.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::campaign::{
        Campaign, CampaignDetail, CampaignImage, CampaignInput, CampaignSummary, NewCampaign,
        NewCampaignImage, slugify,
    },
    repositories::{CampaignRepository, UserRepository},
};

#[derive(Clone)]
pub struct CampaignService {
    repository: Arc<dyn CampaignRepository>,
    users: Arc<dyn UserRepository>,
}

impl CampaignService {
    pub fn new(repository: Arc<dyn CampaignRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { repository, users }
    }

    /// All campaigns, or only those of `user_id` when it is positive.
    pub async fn get_campaigns(&self, user_id: Option<i64>) -> Result<Vec<CampaignSummary>, AppError> {
        match user_id {
            Some(id) if id > 0 => self.repository.find_by_user_id(id).await,
            _ => self.repository.find_all().await,
        }
    }

    pub async fn get_campaign_detail(&self, campaign_id: i64) -> Result<CampaignDetail, AppError> {
        let campaign = self.find(campaign_id).await?;

        let owner = self
            .users
            .find_by_id(campaign.user_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;
        let images = self.repository.find_images(campaign.id).await?;

        Ok(CampaignDetail {
            campaign,
            owner,
            images,
        })
    }

    /// Create a campaign owned by `owner_id`.
    ///
    /// The slug is derived from the name and the owner ID, which keeps two
    /// owners' identically named campaigns apart.
    pub async fn create_campaign(
        &self,
        input: CampaignInput,
        owner_id: i64,
    ) -> Result<Campaign, AppError> {
        let name = input.name.trim().to_string();
        let slug = slugify(&format!("{name} {owner_id}"));

        let campaign = self
            .repository
            .create(NewCampaign {
                user_id: owner_id,
                name,
                short_description: input.short_description.trim().to_string(),
                description: input.description.trim().to_string(),
                perks: input.perks.trim().to_string(),
                goal_amount: input.goal_amount,
                slug,
            })
            .await?;

        tracing::info!(campaign_id = campaign.id, owner_id, "Campaign created");
        Ok(campaign)
    }

    /// Replace the editable fields of a campaign. Owner only.
    pub async fn update_campaign(
        &self,
        campaign_id: i64,
        input: CampaignInput,
        requester_id: i64,
    ) -> Result<Campaign, AppError> {
        let mut campaign = self.get_owned_campaign(campaign_id, requester_id).await?;

        campaign.name = input.name.trim().to_string();
        campaign.short_description = input.short_description.trim().to_string();
        campaign.description = input.description.trim().to_string();
        campaign.perks = input.perks.trim().to_string();
        campaign.goal_amount = input.goal_amount;

        let campaign = self.repository.update(&campaign).await?;

        tracing::info!(campaign_id, "Campaign updated");
        Ok(campaign)
    }

    /// Fetch a campaign, failing with `NotOwner` unless `requester_id` owns it.
    pub async fn get_owned_campaign(
        &self,
        campaign_id: i64,
        requester_id: i64,
    ) -> Result<Campaign, AppError> {
        let campaign = self.find(campaign_id).await?;

        if !campaign.is_owned_by(requester_id) {
            return Err(AppError::NotOwner);
        }

        Ok(campaign)
    }

    /// Attach an already stored image file to a campaign. Owner only.
    ///
    /// A new primary image demotes the existing ones atomically with the
    /// insert, so a campaign never ends up with two primaries or, after a
    /// failed insert, none.
    pub async fn save_campaign_image(
        &self,
        campaign_id: i64,
        requester_id: i64,
        file_name: &str,
        is_primary: bool,
    ) -> Result<CampaignImage, AppError> {
        self.get_owned_campaign(campaign_id, requester_id).await?;

        let image = self
            .repository
            .create_image(NewCampaignImage {
                campaign_id,
                file_name: file_name.to_string(),
                is_primary,
            })
            .await?;

        tracing::info!(campaign_id, image_id = image.id, is_primary, "Campaign image saved");
        Ok(image)
    }

    async fn find(&self, campaign_id: i64) -> Result<Campaign, AppError> {
        self.repository
            .find_by_id(campaign_id)
            .await?
            .ok_or(AppError::NotFound("Campaign"))
    }
}
