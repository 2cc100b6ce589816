//! Data models representing database entities and request inputs.

/// Campaigns and campaign images
pub mod campaign;
/// Backer contributions
pub mod transaction;
/// Registered users
pub mod user;
