//! Business logic services.
//!
//! Services hold the rules that sit between handlers and repositories:
//! ownership checks, password hashing, token issuing, slug and code
//! generation.

pub mod campaign_service;
pub mod token_service;
pub mod transaction_service;
pub mod user_service;

pub use campaign_service::CampaignService;
pub use token_service::TokenService;
pub use transaction_service::TransactionService;
pub use user_service::UserService;
