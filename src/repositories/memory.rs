//! In-memory repositories for tests.
//!
//! One [`MemoryStore`] implements every repository trait over plain vectors,
//! with the same ordering and preloading behavior as the PostgreSQL versions.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    error::AppError,
    models::{
        campaign::{Campaign, CampaignImage, CampaignSummary, NewCampaign, NewCampaignImage},
        transaction::{CampaignTransaction, NewTransaction, Transaction, UserTransaction},
        user::{NewUser, User},
    },
    repositories::{CampaignRepository, TransactionRepository, UserRepository},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    campaigns: Vec<Campaign>,
    images: Vec<CampaignImage>,
    transactions: Vec<Transaction>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with a fixed ID.
    pub fn seed_user(&self, id: i64, name: &str, email: &str) -> User {
        let now = Utc::now();
        let user = User {
            id,
            name: name.to_string(),
            occupation: "Engineer".to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            avatar_file_name: None,
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().users.push(user.clone());
        user
    }

    /// Insert a campaign with a fixed ID owned by `user_id`.
    pub fn seed_campaign(&self, id: i64, user_id: i64, name: &str) -> Campaign {
        let now = Utc::now();
        let campaign = Campaign {
            id,
            user_id,
            name: name.to_string(),
            short_description: format!("{name} in short"),
            description: format!("{name} in long"),
            perks: "thank-you card, sticker".to_string(),
            backer_count: 0,
            goal_amount: 1_000_000,
            current_amount: 0,
            slug: crate::models::campaign::slugify(&format!("{name} {user_id}")),
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().campaigns.push(campaign.clone());
        campaign
    }

    pub fn seed_image(&self, campaign_id: i64, file_name: &str, is_primary: bool) -> CampaignImage {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let image = CampaignImage {
            id: tables.images.len() as i64 + 1,
            campaign_id,
            file_name: file_name.to_string(),
            is_primary,
            created_at: now,
            updated_at: now,
        };
        tables.images.push(image.clone());
        image
    }

    pub fn seed_transaction(&self, id: i64, campaign_id: i64, user_id: i64, amount: i64) {
        let now = Utc::now();
        self.tables.lock().unwrap().transactions.push(Transaction {
            id,
            campaign_id,
            user_id,
            amount,
            status: "paid".to_string(),
            code: format!("TRX-{id:016X}"),
            created_at: now,
            updated_at: now,
        });
    }

    pub fn images_of(&self, campaign_id: i64) -> Vec<CampaignImage> {
        self.tables
            .lock()
            .unwrap()
            .images
            .iter()
            .filter(|image| image.campaign_id == campaign_id)
            .cloned()
            .collect()
    }

    pub fn user(&self, id: i64) -> Option<User> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
        ids.max().unwrap_or(0) + 1
    }

    fn primary_image(tables: &Tables, campaign_id: i64) -> Option<CampaignImage> {
        tables
            .images
            .iter()
            .filter(|image| image.campaign_id == campaign_id && image.is_primary)
            .max_by_key(|image| image.id)
            .cloned()
    }

    fn summaries(&self, filter: impl Fn(&Campaign) -> bool) -> Vec<CampaignSummary> {
        let tables = self.tables.lock().unwrap();
        let mut campaigns: Vec<Campaign> = tables
            .campaigns
            .iter()
            .filter(|c| filter(*c))
            .cloned()
            .collect();
        campaigns.sort_by(|a, b| b.id.cmp(&a.id));

        campaigns
            .into_iter()
            .map(|campaign| CampaignSummary {
                primary_image: Self::primary_image(&tables, campaign.id),
                campaign,
            })
            .collect()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::EmailAlreadyRegistered);
        }

        let now = Utc::now();
        let user = User {
            id: Self::next_id(tables.users.iter().map(|u| u.id)),
            name: user.name,
            occupation: user.occupation,
            email: user.email,
            password_hash: user.password_hash,
            avatar_file_name: None,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_avatar(&self, id: i64, file_name: &str) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound("User"))?;

        user.avatar_file_name = Some(file_name.to_string());
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl CampaignRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<CampaignSummary>, AppError> {
        Ok(self.summaries(|_| true))
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<CampaignSummary>, AppError> {
        Ok(self.summaries(|c| c.user_id == user_id))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn find_images(&self, campaign_id: i64) -> Result<Vec<CampaignImage>, AppError> {
        let mut images = self.images_of(campaign_id);
        images.sort_by_key(|image| (!image.is_primary, image.id));
        Ok(images)
    }

    async fn create(&self, campaign: NewCampaign) -> Result<Campaign, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let campaign = Campaign {
            id: Self::next_id(tables.campaigns.iter().map(|c| c.id)),
            user_id: campaign.user_id,
            name: campaign.name,
            short_description: campaign.short_description,
            description: campaign.description,
            perks: campaign.perks,
            backer_count: 0,
            goal_amount: campaign.goal_amount,
            current_amount: 0,
            slug: campaign.slug,
            created_at: now,
            updated_at: now,
        };
        tables.campaigns.push(campaign.clone());
        Ok(campaign)
    }

    async fn update(&self, campaign: &Campaign) -> Result<Campaign, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .campaigns
            .iter_mut()
            .find(|c| c.id == campaign.id)
            .ok_or(AppError::NotFound("Campaign"))?;

        stored.name = campaign.name.clone();
        stored.short_description = campaign.short_description.clone();
        stored.description = campaign.description.clone();
        stored.perks = campaign.perks.clone();
        stored.goal_amount = campaign.goal_amount;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn create_image(&self, image: NewCampaignImage) -> Result<CampaignImage, AppError> {
        let mut tables = self.tables.lock().unwrap();

        if image.is_primary {
            tables
                .images
                .iter_mut()
                .filter(|existing| existing.campaign_id == image.campaign_id)
                .for_each(|existing| existing.is_primary = false);
        }

        let now = Utc::now();
        let image = CampaignImage {
            id: tables.images.len() as i64 + 1,
            campaign_id: image.campaign_id,
            file_name: image.file_name,
            is_primary: image.is_primary,
            created_at: now,
            updated_at: now,
        };
        tables.images.push(image.clone());
        Ok(image)
    }
}

#[async_trait]
impl TransactionRepository for MemoryStore {
    async fn find_by_campaign_id(
        &self,
        campaign_id: i64,
    ) -> Result<Vec<CampaignTransaction>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Transaction> = tables
            .transactions
            .iter()
            .filter(|t| t.campaign_id == campaign_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));

        rows.into_iter()
            .map(|transaction| {
                let backer = tables
                    .users
                    .iter()
                    .find(|u| u.id == transaction.user_id)
                    .cloned()
                    .ok_or(AppError::NotFound("User"))?;
                Ok(CampaignTransaction {
                    transaction,
                    backer,
                })
            })
            .collect()
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<UserTransaction>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Transaction> = tables
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));

        rows.into_iter()
            .map(|transaction| {
                let campaign = tables
                    .campaigns
                    .iter()
                    .find(|c| c.id == transaction.campaign_id)
                    .cloned()
                    .ok_or(AppError::NotFound("Campaign"))?;
                Ok(UserTransaction {
                    primary_image: Self::primary_image(&tables, campaign.id),
                    transaction,
                    campaign,
                })
            })
            .collect()
    }

    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let transaction = Transaction {
            id: Self::next_id(tables.transactions.iter().map(|t| t.id)),
            campaign_id: transaction.campaign_id,
            user_id: transaction.user_id,
            amount: transaction.amount,
            status: transaction.status,
            code: transaction.code,
            created_at: now,
            updated_at: now,
        };
        tables.transactions.push(transaction.clone());
        Ok(transaction)
    }
}
