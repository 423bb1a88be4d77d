//! Order repository contracts and SQLite implementation.

use crate::model::order::{DeliveryType, NewOrder, Order, OrderId};
use crate::repo::{map_insert_error, require_row, Entity, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for customer orders.
pub trait OrderRepository {
    fn create_order(&self, order: &NewOrder) -> RepoResult<OrderId>;
    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>>;
    fn delete_order(&self, id: OrderId) -> RepoResult<()>;
}

/// SQLite-backed order repository.
pub struct SqliteOrderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn create_order(&self, order: &NewOrder) -> RepoResult<OrderId> {
        require_row(self.conn, Entity::Customer, order.customer_id)?;
        require_row(self.conn, Entity::Product, order.product_id)?;

        self.conn
            .execute(
                "INSERT INTO Orders (
                    Price,
                    UserName,
                    UserAddress,
                    DeliveryType,
                    CustomerId,
                    ProductId
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    order.price.as_str(),
                    order.user_name.as_str(),
                    order.user_address.as_str(),
                    order.delivery_type.0,
                    order.customer_id,
                    order.product_id,
                ],
            )
            .map_err(|err| map_insert_error(err, Entity::Order, "id"))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let order = self
            .conn
            .query_row(
                "SELECT
                    Id,
                    Price,
                    UserName,
                    UserAddress,
                    DeliveryType,
                    CustomerId,
                    ProductId
                 FROM Orders
                 WHERE Id = ?1;",
                [id],
                |row| {
                    Ok(Order {
                        id: row.get("Id")?,
                        price: row.get("Price")?,
                        user_name: row.get("UserName")?,
                        user_address: row.get("UserAddress")?,
                        delivery_type: DeliveryType(row.get("DeliveryType")?),
                        customer_id: row.get("CustomerId")?,
                        product_id: row.get("ProductId")?,
                    })
                },
            )
            .optional()?;
        Ok(order)
    }

    fn delete_order(&self, id: OrderId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM Orders WHERE Id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Order,
                key: format!("id={id}"),
            });
        }
        Ok(())
    }
}
