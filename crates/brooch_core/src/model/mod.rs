//! Catalog domain model.
//!
//! # Responsibility
//! - Define the five persisted catalog records and their insert shapes.
//! - Validate insert input before it reaches SQL.
//!
//! # Invariants
//! - Every persisted record is identified by an engine-assigned integer id.
//! - Records are only inserted or deleted, never updated in place.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category;
pub mod customer;
pub mod image;
pub mod order;
pub mod product;

/// Input rejected before any SQL runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyLogin,
    EmptyImagePath,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLogin => write!(f, "customer login cannot be empty"),
            Self::EmptyImagePath => write!(f, "image path cannot be empty"),
        }
    }
}

impl Error for ValidationError {}
