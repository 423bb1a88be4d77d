//! Customer repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `Login` is the natural key for lookups and deletes.
//! - A customer referenced by any order cannot be removed.

use crate::model::customer::{Customer, CustomerId, NewCustomer};
use crate::repo::{
    bool_from_int, bool_to_int, ensure_unreferenced, map_delete_error, map_insert_error, Entity,
    RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const CUSTOMER_SELECT_SQL: &str = "SELECT Id, Login, Password, Admin FROM Customers";

/// Repository interface for customer accounts.
pub trait CustomerRepository {
    fn create_customer(&self, customer: &NewCustomer) -> RepoResult<CustomerId>;
    fn get_customer(&self, login: &str) -> RepoResult<Option<Customer>>;
    fn delete_customer(&self, login: &str) -> RepoResult<CustomerId>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn create_customer(&self, customer: &NewCustomer) -> RepoResult<CustomerId> {
        customer.validate()?;

        self.conn
            .execute(
                "INSERT INTO Customers (Login, Password, Admin) VALUES (?1, ?2, ?3);",
                params![
                    customer.login.as_str(),
                    customer.password.as_str(),
                    bool_to_int(customer.admin),
                ],
            )
            .map_err(|err| map_insert_error(err, Entity::Customer, "login"))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_customer(&self, login: &str) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE Login = ?1;"))?;
        let mut rows = stmt.query([login])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }
        Ok(None)
    }

    /// Deletes by login and returns the removed id.
    fn delete_customer(&self, login: &str) -> RepoResult<CustomerId> {
        let id: Option<CustomerId> = self
            .conn
            .query_row("SELECT Id FROM Customers WHERE Login = ?1;", [login], |row| {
                row.get(0)
            })
            .optional()?;
        let Some(id) = id else {
            return Err(RepoError::NotFound {
                entity: Entity::Customer,
                key: format!("login={login}"),
            });
        };

        ensure_unreferenced(self.conn, Entity::Customer, id, Entity::Order, "CustomerId")?;

        let changed = self
            .conn
            .execute("DELETE FROM Customers WHERE Id = ?1;", [id])
            .map_err(|err| map_delete_error(err, Entity::Customer, id))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Customer,
                key: format!("login={login}"),
            });
        }

        Ok(id)
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    Ok(Customer {
        id: row.get("Id")?,
        login: row.get("Login")?,
        password: row.get("Password")?,
        admin: bool_from_int(row.get("Admin")?, "Customers.Admin")?,
    })
}
