//! Customer order model.

use super::customer::CustomerId;
use super::product::ProductId;
use serde::{Deserialize, Serialize};

pub type OrderId = i64;

/// Shipping method code. Open enumeration owned by the bot layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryType(pub i64);

/// Persisted order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub price: String,
    pub user_name: String,
    pub user_address: String,
    pub delivery_type: DeliveryType,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
}

/// Insert shape for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub price: String,
    pub user_name: String,
    pub user_address: String,
    pub delivery_type: DeliveryType,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
}
