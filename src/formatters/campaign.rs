use serde::Serialize;

use crate::models::campaign::{Campaign, CampaignDetail, CampaignImage, CampaignSummary};

/// Campaign as shown in listings and after create/update.
#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub short_description: String,
    pub image_url: Option<String>,
    pub goal_amount: i64,
    pub current_amount: i64,
    pub slug: String,
}

impl CampaignResponse {
    pub fn new(campaign: Campaign, primary_image: Option<CampaignImage>) -> Self {
        Self {
            id: campaign.id,
            user_id: campaign.user_id,
            name: campaign.name,
            short_description: campaign.short_description,
            image_url: primary_image.map(|image| image.file_name),
            goal_amount: campaign.goal_amount,
            current_amount: campaign.current_amount,
            slug: campaign.slug,
        }
    }
}

impl From<CampaignSummary> for CampaignResponse {
    fn from(summary: CampaignSummary) -> Self {
        Self::new(summary.campaign, summary.primary_image)
    }
}

/// Campaign detail page.
///
/// `image_url` is the primary image; `images` lists all of them.
#[derive(Debug, Serialize)]
pub struct CampaignDetailResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub image_url: Option<String>,
    pub goal_amount: i64,
    pub current_amount: i64,
    pub backer_count: i32,
    pub slug: String,
    pub perks: Vec<String>,
    pub user: CampaignOwnerResponse,
    pub images: Vec<CampaignImageResponse>,
}

#[derive(Debug, Serialize)]
pub struct CampaignOwnerResponse {
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CampaignImageResponse {
    pub image_url: String,
    pub is_primary: bool,
}

impl From<CampaignDetail> for CampaignDetailResponse {
    fn from(detail: CampaignDetail) -> Self {
        let CampaignDetail {
            campaign,
            owner,
            images,
        } = detail;

        Self {
            perks: campaign.perk_list(),
            image_url: images
                .iter()
                .find(|image| image.is_primary)
                .map(|image| image.file_name.clone()),
            id: campaign.id,
            user_id: campaign.user_id,
            name: campaign.name,
            short_description: campaign.short_description,
            description: campaign.description,
            goal_amount: campaign.goal_amount,
            current_amount: campaign.current_amount,
            backer_count: campaign.backer_count,
            slug: campaign.slug,
            user: CampaignOwnerResponse {
                name: owner.name,
                image_url: owner.avatar_file_name,
            },
            images: images
                .into_iter()
                .map(|image| CampaignImageResponse {
                    image_url: image.file_name,
                    is_primary: image.is_primary,
                })
                .collect(),
        }
    }
}
