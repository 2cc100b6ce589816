//! Data access layer.
//!
//! One trait per entity, implemented for PostgreSQL with `sqlx`. Related
//! rows are "preloaded": the parent rows are fetched first, then the
//! children are fetched in a single `= ANY($1)` query and stitched on.

pub mod campaigns;
pub mod transactions;
pub mod users;

#[cfg(test)]
pub mod memory;

pub use campaigns::{CampaignRepository, PgCampaignRepository};
pub use transactions::{PgTransactionRepository, TransactionRepository};
pub use users::{PgUserRepository, UserRepository};
