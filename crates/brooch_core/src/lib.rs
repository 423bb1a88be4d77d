//! Storage core for the brooch shop bot.
//! This crate owns the catalog schema and every write against it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{StoreConfig, DB_PATH_ENV};
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId, CategoryType, NewCategory};
pub use model::customer::{Customer, CustomerId, NewCustomer};
pub use model::image::{Image, ImageId};
pub use model::order::{DeliveryType, NewOrder, Order, OrderId};
pub use model::product::{NewProduct, Product, ProductId};
pub use model::ValidationError;
pub use repo::{Entity, RepoError, RepoResult};
pub use service::catalog_store::CatalogStore;
pub use service::fixtures::fixture_entries;
pub use service::seed::{CatalogEntry, SeedError, SeedStep, SeededEntry};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
