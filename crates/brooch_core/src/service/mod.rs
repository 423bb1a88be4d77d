//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the store operations the bot uses.
//! - Keep the bot layer decoupled from SQL and connection handling.

pub mod catalog_store;
pub mod fixtures;
pub mod seed;
