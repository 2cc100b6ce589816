//! Public response shapes.
//!
//! Formatters turn entities into what clients see: no password hashes, no
//! internal foreign keys they have no use for, related rows flattened into
//! the fields the UI needs.

pub mod campaign;
pub mod transaction;
pub mod user;
