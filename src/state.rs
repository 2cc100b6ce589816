//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    config::Config,
    db::DbPool,
    repositories::{PgCampaignRepository, PgTransactionRepository, PgUserRepository},
    services::{CampaignService, TokenService, TransactionService, UserService},
    storage::UploadStore,
};

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub campaigns: CampaignService,
    pub transactions: TransactionService,
    pub tokens: TokenService,
    pub uploads: UploadStore,
}

impl AppState {
    /// Wire the services to PostgreSQL repositories sharing one pool.
    pub fn new(pool: DbPool, config: &Config) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let campaigns = Arc::new(PgCampaignRepository::new(pool.clone()));
        let transactions = Arc::new(PgTransactionRepository::new(pool));

        Self {
            users: UserService::new(users.clone(), config.bcrypt_cost),
            campaigns: CampaignService::new(campaigns.clone(), users),
            transactions: TransactionService::new(transactions, campaigns),
            tokens: TokenService::new(
                &config.token_secret,
                chrono::Duration::hours(config.token_ttl_hours),
            ),
            uploads: UploadStore::new(&config.upload_dir),
        }
    }

    /// Services over one in-memory store, with the lowest bcrypt cost.
    #[cfg(test)]
    pub fn in_memory(
        store: Arc<crate::repositories::memory::MemoryStore>,
        upload_dir: impl AsRef<std::path::Path>,
    ) -> Self {
        Self {
            users: UserService::new(store.clone(), 4),
            campaigns: CampaignService::new(store.clone(), store.clone()),
            transactions: TransactionService::new(store.clone(), store),
            tokens: TokenService::new("test-secret", chrono::Duration::hours(1)),
            uploads: UploadStore::new(upload_dir),
        }
    }
}
