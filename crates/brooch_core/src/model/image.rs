//! Product/category image reference.

use super::ValidationError;
use serde::{Deserialize, Serialize};

pub type ImageId = i64;

/// Persisted image row. `path` points at an asset on disk or in the bot bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub path: String,
}

/// Rejects blank paths; uniqueness is left to the store.
pub fn validate_image_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::EmptyImagePath);
    }
    Ok(())
}
