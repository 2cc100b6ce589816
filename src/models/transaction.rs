//! Transaction data models and request inputs.
//!
//! This module defines:
//! - `Transaction`: database entity representing a backer's contribution
//! - `CampaignTransaction` / `UserTransaction`: transactions with their
//!   related rows eagerly loaded, one per read path
//! - `CreateTransactionInput`: request body for backing a campaign

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::FieldErrors,
    models::{
        campaign::{Campaign, CampaignImage},
        user::User,
    },
    validation::{Validate, Violations},
};

/// Status of every transaction created through the API.
///
/// Payment confirmation is handled outside this service.
pub const STATUS_PENDING: &str = "pending";

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction belongs to one
/// campaign and one user (the backer).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Transaction {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: i64,

    /// Amount in the smallest currency unit, always positive
    pub amount: i64,

    pub status: String,

    /// Unique public reference, e.g. `TRX-9F2C41D07A3B66E1`
    pub code: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A transaction with the backing user attached.
///
/// Returned when a campaign owner lists the campaign's transactions.
#[derive(Debug, Clone)]
pub struct CampaignTransaction {
    pub transaction: Transaction,
    pub backer: User,
}

/// A transaction with its campaign and that campaign's primary image.
///
/// Returned when users list their own transactions. The image is `None`
/// when the campaign has no primary image.
#[derive(Debug, Clone)]
pub struct UserTransaction {
    pub transaction: Transaction,
    pub campaign: Campaign,
    pub primary_image: Option<CampaignImage>,
}

/// Values needed to insert a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub campaign_id: i64,
    pub user_id: i64,
    pub amount: i64,
    pub status: String,
    pub code: String,
}

/// Request body of `POST /transactions`.
///
/// # JSON Example
///
/// ```json
/// {
///   "campaign_id": 42,
///   "amount": 250000
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTransactionInput {
    pub campaign_id: i64,
    pub amount: i64,
}

impl Validate for CreateTransactionInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        Violations::new()
            .positive("campaign_id", self.campaign_id)
            .positive("amount", self.amount)
            .finish()
    }
}
