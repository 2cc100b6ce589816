//! Transaction repository.

use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::AppError,
    models::transaction::{CampaignTransaction, NewTransaction, Transaction, UserTransaction},
    repositories::{campaigns, users},
};

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Transactions of a campaign, newest first, each with its backer.
    async fn find_by_campaign_id(
        &self,
        campaign_id: i64,
    ) -> Result<Vec<CampaignTransaction>, AppError>;

    /// Transactions of a user, newest first, each with its campaign and
    /// that campaign's primary image.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<UserTransaction>, AppError>;

    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, AppError>;
}

pub struct PgTransactionRepository {
    pool: DbPool,
}

impl PgTransactionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn find_by_campaign_id(
        &self,
        campaign_id: i64,
    ) -> Result<Vec<CampaignTransaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE campaign_id = $1 ORDER BY id DESC",
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;

        let user_ids: Vec<i64> = transactions.iter().map(|t| t.user_id).collect();
        let backers = users::load_users(&self.pool, &user_ids).await?;

        transactions
            .into_iter()
            .map(|transaction| {
                let backer = backers
                    .get(&transaction.user_id)
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
        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE user_id = $1 ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let campaign_ids: Vec<i64> = transactions.iter().map(|t| t.campaign_id).collect();
        let campaigns = campaigns::load_campaigns(&self.pool, &campaign_ids).await?;
        let images = campaigns::load_primary_images(&self.pool, &campaign_ids).await?;

        transactions
            .into_iter()
            .map(|transaction| {
                let campaign = campaigns
                    .get(&transaction.campaign_id)
                    .cloned()
                    .ok_or(AppError::NotFound("Campaign"))?;

                Ok(UserTransaction {
                    primary_image: images.get(&campaign.id).cloned(),
                    transaction,
                    campaign,
                })
            })
            .collect()
    }

    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (campaign_id, user_id, amount, status, code)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(transaction.campaign_id)
        .bind(transaction.user_id)
        .bind(transaction.amount)
        .bind(transaction.status)
        .bind(transaction.code)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }
}
