//! Brooch category model.
//!
//! # Invariants
//! - `kind` is unique across all categories.
//! - `CategoryType` is an open enumeration: unknown values are kept, not rejected.

use super::image::ImageId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type CategoryId = i64;

/// Kind of brooch a category groups, stored as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryType(pub i64);

impl CategoryType {
    /// Dragonfly brooches.
    pub const DRAGONFLY: Self = Self(1);
    /// Fly brooches.
    pub const FLY: Self = Self(2);

    /// Human-readable label for known kinds.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::DRAGONFLY => Some("dragonfly"),
            Self::FLY => Some("fly"),
            _ => None,
        }
    }
}

impl Display for CategoryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{label}"),
            None => write!(f, "type#{}", self.0),
        }
    }
}

/// Persisted category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    pub name: String,
    pub image_id: Option<ImageId>,
}

/// Insert shape for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    #[serde(rename = "type")]
    pub kind: CategoryType,
    pub name: String,
    pub image_id: Option<ImageId>,
}

impl NewCategory {
    pub fn new(kind: CategoryType, name: impl Into<String>, image_id: Option<ImageId>) -> Self {
        Self {
            kind,
            name: name.into(),
            image_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CategoryType;

    #[test]
    fn known_kinds_have_labels() {
        assert_eq!(CategoryType::DRAGONFLY.to_string(), "dragonfly");
        assert_eq!(CategoryType::FLY.to_string(), "fly");
    }

    #[test]
    fn unknown_kinds_are_kept() {
        let kind = CategoryType(7);
        assert_eq!(kind.label(), None);
        assert_eq!(kind.to_string(), "type#7");
    }
}
