//! Campaign data models and request inputs.
//!
//! This module defines:
//! - `Campaign` / `CampaignImage`: database entities
//! - `CampaignSummary`: a campaign joined with its primary image, used by listings
//! - `CampaignInput`: request body for creating and updating campaigns

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::FieldErrors,
    models::user::User,
    validation::{Validate, Violations},
};

/// Represents a campaign record from the database.
///
/// # Database Table
///
/// Maps to the `campaigns` table. Each campaign is owned by exactly one
/// user (`user_id`); only that user may edit it, add images to it, or list
/// its transactions.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Campaign {
    pub id: i64,

    /// Owner of the campaign
    pub user_id: i64,

    pub name: String,
    pub short_description: String,
    pub description: String,

    /// Comma-separated list of backer rewards
    pub perks: String,

    pub backer_count: i32,

    /// Target amount in the smallest currency unit
    pub goal_amount: i64,

    pub current_amount: i64,

    /// URL-friendly identifier derived from the name and owner
    pub slug: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Perks split on commas, trimmed, empties dropped.
    pub fn perk_list(&self) -> Vec<String> {
        self.perks
            .split(',')
            .map(str::trim)
            .filter(|perk| !perk.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Image attached to a campaign.
///
/// At most one image per campaign has `is_primary = true`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CampaignImage {
    pub id: i64,
    pub campaign_id: i64,
    pub file_name: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A campaign with its primary image eagerly loaded.
#[derive(Debug, Clone)]
pub struct CampaignSummary {
    pub campaign: Campaign,
    pub primary_image: Option<CampaignImage>,
}

/// A campaign with its owner and every image, for the detail page.
#[derive(Debug, Clone)]
pub struct CampaignDetail {
    pub campaign: Campaign,
    pub owner: User,
    pub images: Vec<CampaignImage>,
}

/// Values needed to insert a campaign.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub user_id: i64,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub perks: String,
    pub goal_amount: i64,
    pub slug: String,
}

/// Values needed to insert a campaign image.
#[derive(Debug, Clone)]
pub struct NewCampaignImage {
    pub campaign_id: i64,
    pub file_name: String,
    pub is_primary: bool,
}

/// Request body of `POST /campaigns` and `PUT /campaigns/{id}`.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Solar panels for the school",
///   "short_description": "Clean power for 300 pupils",
///   "description": "...",
///   "goal_amount": 50000000,
///   "perks": "thank-you card, school visit"
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CampaignInput {
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub goal_amount: i64,
    pub perks: String,
}

impl Validate for CampaignInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        Violations::new()
            .required("name", &self.name)
            .required("short_description", &self.short_description)
            .required("description", &self.description)
            .positive("goal_amount", self.goal_amount)
            .finish()
    }
}

/// Query string of `GET /campaigns`.
#[derive(Debug, Default, Deserialize)]
pub struct CampaignListQuery {
    /// Only this user's campaigns when positive
    pub user_id: Option<i64>,
}

/// Build a slug from arbitrary text: lower-case ASCII alphanumerics joined by `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
