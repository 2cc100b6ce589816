//! Campaign and campaign image repository.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::AppError,
    models::campaign::{Campaign, CampaignImage, CampaignSummary, NewCampaign, NewCampaignImage},
};

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Every campaign, newest first, with its primary image.
    async fn find_all(&self) -> Result<Vec<CampaignSummary>, AppError>;

    /// Campaigns owned by `user_id`, newest first, with their primary image.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<CampaignSummary>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError>;

    /// All images of a campaign, primary first.
    async fn find_images(&self, campaign_id: i64) -> Result<Vec<CampaignImage>, AppError>;

    async fn create(&self, campaign: NewCampaign) -> Result<Campaign, AppError>;

    /// Persist the editable fields of `campaign`.
    async fn update(&self, campaign: &Campaign) -> Result<Campaign, AppError>;

    /// Insert an image. A primary image demotes the campaign's existing
    /// primaries in the same transaction, so a campaign never has two.
    async fn create_image(&self, image: NewCampaignImage) -> Result<CampaignImage, AppError>;
}

pub struct PgCampaignRepository {
    pool: DbPool,
}

impl PgCampaignRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn with_primary_images(
        &self,
        campaigns: Vec<Campaign>,
    ) -> Result<Vec<CampaignSummary>, AppError> {
        let ids: Vec<i64> = campaigns.iter().map(|c| c.id).collect();
        let mut images = load_primary_images(&self.pool, &ids).await?;

        Ok(campaigns
            .into_iter()
            .map(|campaign| CampaignSummary {
                primary_image: images.remove(&campaign.id),
                campaign,
            })
            .collect())
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    async fn find_all(&self) -> Result<Vec<CampaignSummary>, AppError> {
        let campaigns = sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        self.with_primary_images(campaigns).await
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<CampaignSummary>, AppError> {
        let campaigns = sqlx::query_as::<_, Campaign>(
            "SELECT * FROM campaigns WHERE user_id = $1 ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        self.with_primary_images(campaigns).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(campaign)
    }

    async fn find_images(&self, campaign_id: i64) -> Result<Vec<CampaignImage>, AppError> {
        let images = sqlx::query_as::<_, CampaignImage>(
            "SELECT * FROM campaign_images WHERE campaign_id = $1 ORDER BY is_primary DESC, id ASC",
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn create(&self, campaign: NewCampaign) -> Result<Campaign, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            INSERT INTO campaigns (user_id, name, short_description, description, perks, goal_amount, slug)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(campaign.user_id)
        .bind(campaign.name)
        .bind(campaign.short_description)
        .bind(campaign.description)
        .bind(campaign.perks)
        .bind(campaign.goal_amount)
        .bind(campaign.slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(campaign)
    }

    async fn update(&self, campaign: &Campaign) -> Result<Campaign, AppError> {
        sqlx::query_as::<_, Campaign>(
            r#"
            UPDATE campaigns
            SET name = $1,
                short_description = $2,
                description = $3,
                perks = $4,
                goal_amount = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&campaign.name)
        .bind(&campaign.short_description)
        .bind(&campaign.description)
        .bind(&campaign.perks)
        .bind(campaign.goal_amount)
        .bind(campaign.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Campaign"))
    }

    async fn create_image(&self, image: NewCampaignImage) -> Result<CampaignImage, AppError> {
        let mut tx = self.pool.begin().await?;

        if image.is_primary {
            // Row lock serializes concurrent primary uploads of one campaign
            sqlx::query_scalar::<_, i64>("SELECT id FROM campaigns WHERE id = $1 FOR UPDATE")
                .bind(image.campaign_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(AppError::NotFound("Campaign"))?;

            sqlx::query(
                "UPDATE campaign_images SET is_primary = FALSE, updated_at = NOW() WHERE campaign_id = $1 AND is_primary",
            )
            .bind(image.campaign_id)
            .execute(&mut *tx)
            .await?;
        }

        let image = sqlx::query_as::<_, CampaignImage>(
            r#"
            INSERT INTO campaign_images (campaign_id, file_name, is_primary)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(image.campaign_id)
        .bind(image.file_name)
        .bind(image.is_primary)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(image)
    }
}

/// Load the primary image of each given campaign, keyed by campaign ID.
///
/// Campaigns without a primary image are absent from the map. Should a
/// campaign somehow carry several, the newest one wins.
pub(crate) async fn load_primary_images(
    pool: &DbPool,
    campaign_ids: &[i64],
) -> Result<HashMap<i64, CampaignImage>, AppError> {
    if campaign_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let images = sqlx::query_as::<_, CampaignImage>(
        r#"
        SELECT * FROM campaign_images
        WHERE campaign_id = ANY($1) AND is_primary = TRUE
        ORDER BY id DESC
        "#,
    )
    .bind(campaign_ids)
    .fetch_all(pool)
    .await?;

    let mut by_campaign = HashMap::with_capacity(images.len());
    for image in images {
        by_campaign.entry(image.campaign_id).or_insert(image);
    }

    Ok(by_campaign)
}

/// Load the campaigns with the given IDs, keyed by ID.
pub(crate) async fn load_campaigns(
    pool: &DbPool,
    ids: &[i64],
) -> Result<HashMap<i64, Campaign>, AppError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let campaigns = sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;

    Ok(campaigns.into_iter().map(|c| (c.id, c)).collect())
}
