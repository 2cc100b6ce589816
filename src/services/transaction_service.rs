//! Transaction service.
//!
//! The one authorization rule of the platform lives here: only the owner of
//! a campaign may list the campaign's transactions.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::transaction::{
        CampaignTransaction, CreateTransactionInput, NewTransaction, STATUS_PENDING, Transaction,
        UserTransaction,
    },
    repositories::{CampaignRepository, TransactionRepository},
};

#[derive(Clone)]
pub struct TransactionService {
    repository: Arc<dyn TransactionRepository>,
    campaigns: Arc<dyn CampaignRepository>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        campaigns: Arc<dyn CampaignRepository>,
    ) -> Self {
        Self {
            repository,
            campaigns,
        }
    }

    /// Transactions of a campaign, newest first, each with its backer.
    ///
    /// # Errors
    ///
    /// - `NotFound`: the campaign does not exist
    /// - `NotOwner`: `requester_id` is not the campaign owner; nothing is read
    pub async fn get_transactions_by_campaign_id(
        &self,
        campaign_id: i64,
        requester_id: i64,
    ) -> Result<Vec<CampaignTransaction>, AppError> {
        let campaign = self
            .campaigns
            .find_by_id(campaign_id)
            .await?
            .ok_or(AppError::NotFound("Campaign"))?;

        if !campaign.is_owned_by(requester_id) {
            return Err(AppError::NotOwner);
        }

        self.repository.find_by_campaign_id(campaign_id).await
    }

    /// Transactions of a user, newest first, with campaign and primary image.
    pub async fn get_transactions_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<UserTransaction>, AppError> {
        self.repository.find_by_user_id(user_id).await
    }

    /// Record a pending contribution of `backer_id` to a campaign.
    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
        backer_id: i64,
    ) -> Result<Transaction, AppError> {
        self.campaigns
            .find_by_id(input.campaign_id)
            .await?
            .ok_or(AppError::NotFound("Campaign"))?;

        let transaction = self
            .repository
            .create(NewTransaction {
                campaign_id: input.campaign_id,
                user_id: backer_id,
                amount: input.amount,
                status: STATUS_PENDING.to_string(),
                code: generate_code(),
            })
            .await?;

        tracing::info!(
            transaction_id = transaction.id,
            campaign_id = transaction.campaign_id,
            backer_id,
            "Transaction created"
        );
        Ok(transaction)
    }
}

/// `TRX-` followed by 16 upper-case hex characters (8 random bytes).
fn generate_code() -> String {
    let bytes: [u8; 8] = rand::random();
    format!("TRX-{}", hex::encode_upper(bytes))
}
