//! Shop customer record.

use super::ValidationError;
use serde::{Deserialize, Serialize};

pub type CustomerId = i64;

/// Persisted customer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    /// Unique across all customers.
    pub login: String,
    pub password: String,
    pub admin: bool,
}

/// Insert shape for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub admin: bool,
}

impl NewCustomer {
    /// Creates a regular (non-admin) customer.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            admin: false,
        }
    }

    /// Sets the administrator flag.
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.login.trim().is_empty() {
            return Err(ValidationError::EmptyLogin);
        }
        Ok(())
    }
}
