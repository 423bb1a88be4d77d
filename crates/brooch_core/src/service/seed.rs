//! Composite image + category + product insert.
//!
//! # Responsibility
//! - Write the three linked rows of one catalog entry as a single unit.
//! - Report which step failed.
//!
//! # Invariants
//! - All three inserts share one immediate transaction; any failure rolls
//!   back every row written by the call.
//! - The category and the product reference the image inserted in the same
//!   transaction.

use crate::model::category::{CategoryId, CategoryType, NewCategory};
use crate::model::image::ImageId;
use crate::model::product::{NewProduct, ProductId};
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::image_repo::{ImageRepository, SqliteImageRepository};
use crate::repo::product_repo::{ProductRepository, SqliteProductRepository};
use crate::repo::RepoError;
use rusqlite::{Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One image, its category and the first product in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub image_path: String,
    pub category_type: CategoryType,
    pub category_name: String,
    pub product_name: String,
    pub product_description: String,
    pub product_price: String,
    pub quantity_in_stock: u32,
    pub quantity_purchased: u32,
}

/// Ids written by a successful seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededEntry {
    pub image_id: ImageId,
    pub category_id: CategoryId,
    pub product_id: ProductId,
}

/// Stage of the seed operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStep {
    Transaction,
    Image,
    Category,
    Product,
}

impl SeedStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Image => "image",
            Self::Category => "category",
            Self::Product => "product",
        }
    }
}

/// Seed failure tagged with the step that raised it.
#[derive(Debug)]
pub struct SeedError {
    pub step: SeedStep,
    pub source: RepoError,
}

impl SeedError {
    fn at(step: SeedStep) -> impl FnOnce(RepoError) -> Self {
        move |source| Self { step, source }
    }
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "seed failed at {} step: {}", self.step.as_str(), self.source)
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Writes image, category and product in one transaction.
pub(crate) fn seed_entry(
    conn: &mut Connection,
    entry: &CatalogEntry,
) -> Result<SeededEntry, SeedError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|err| SeedError::at(SeedStep::Transaction)(err.into()))?;

    let image_id = SqliteImageRepository::new(&tx)
        .create_image(&entry.image_path)
        .map_err(SeedError::at(SeedStep::Image))?;

    let category_id = SqliteCategoryRepository::new(&tx)
        .create_category(&NewCategory::new(
            entry.category_type,
            entry.category_name.as_str(),
            Some(image_id),
        ))
        .map_err(SeedError::at(SeedStep::Category))?;

    let product_id = SqliteProductRepository::new(&tx)
        .create_product(&NewProduct {
            name: entry.product_name.clone(),
            description: entry.product_description.clone(),
            price: entry.product_price.clone(),
            quantity_in_stock: entry.quantity_in_stock,
            quantity_purchased: entry.quantity_purchased,
            category_id,
            image_id,
        })
        .map_err(SeedError::at(SeedStep::Product))?;

    tx.commit()
        .map_err(|err| SeedError::at(SeedStep::Transaction)(err.into()))?;

    Ok(SeededEntry {
        image_id,
        category_id,
        product_id,
    })
}
