//! Brooch product model.
//!
//! # Invariants
//! - `price` is display-ready currency text and is stored verbatim.
//! - Quantities are non-negative; `u32` enforces it on the write path and the
//!   repository rejects negative persisted values on read.

use super::category::CategoryId;
use super::image::ImageId;
use serde::{Deserialize, Serialize};

pub type ProductId = i64;

/// Persisted product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity_in_stock: u32,
    pub quantity_purchased: u32,
    pub category_id: CategoryId,
    pub image_id: ImageId,
}

/// Insert shape for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity_in_stock: u32,
    pub quantity_purchased: u32,
    pub category_id: CategoryId,
    pub image_id: ImageId,
}
