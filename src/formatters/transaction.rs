use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::transaction::{CampaignTransaction, Transaction, UserTransaction};

/// Row of `GET /campaigns/{id}/transactions`: who backed, how much, when.
#[derive(Debug, Serialize)]
pub struct CampaignTransactionResponse {
    pub id: i64,
    /// Backer's name
    pub name: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CampaignTransaction> for CampaignTransactionResponse {
    fn from(row: CampaignTransaction) -> Self {
        Self {
            id: row.transaction.id,
            name: row.backer.name,
            amount: row.transaction.amount,
            created_at: row.transaction.created_at,
        }
    }
}

/// Row of `GET /transactions`.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 3,
///   "amount": 250000,
///   "status": "pending",
///   "created_at": "2025-12-21T16:00:00Z",
///   "campaign": { "name": "Solar", "image_url": "images/campaign-42-b.png" }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct UserTransactionResponse {
    pub id: i64,
    pub amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub campaign: TransactionCampaignResponse,
}

#[derive(Debug, Serialize)]
pub struct TransactionCampaignResponse {
    pub name: String,
    /// Primary image, if the campaign has one
    pub image_url: Option<String>,
}

impl From<UserTransaction> for UserTransactionResponse {
    fn from(row: UserTransaction) -> Self {
        Self {
            id: row.transaction.id,
            amount: row.transaction.amount,
            status: row.transaction.status,
            created_at: row.transaction.created_at,
            campaign: TransactionCampaignResponse {
                name: row.campaign.name,
                image_url: row.primary_image.map(|image| image.file_name),
            },
        }
    }
}

/// Body returned after backing a campaign.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: i64,
    pub amount: i64,
    pub status: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            campaign_id: transaction.campaign_id,
            user_id: transaction.user_id,
            amount: transaction.amount,
            status: transaction.status,
            code: transaction.code,
            created_at: transaction.created_at,
        }
    }
}
