//! Catalog store: the single entry point the bot layer talks to.
//!
//! # Responsibility
//! - Own the SQLite connection for the process lifetime (open -> operate -> close).
//! - Expose fixed create/delete/read operations over the five catalog tables.
//! - Log every outcome and hand the caller a typed result.
//!
//! # Invariants
//! - Opening a store never clears or seeds data.
//! - Per-row failures never panic; they come back as `RepoError`/`SeedError`.
//! - Log events carry ids and error codes only, never passwords or addresses.

use crate::config::StoreConfig;
use crate::db::{ensure_schema, open_db, open_db_in_memory, DbResult};
use crate::model::category::{Category, CategoryId, CategoryType, NewCategory};
use crate::model::customer::{Customer, CustomerId, NewCustomer};
use crate::model::image::{Image, ImageId};
use crate::model::order::{NewOrder, Order, OrderId};
use crate::model::product::{NewProduct, Product, ProductId};
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
use crate::repo::image_repo::{ImageRepository, SqliteImageRepository};
use crate::repo::order_repo::{OrderRepository, SqliteOrderRepository};
use crate::repo::product_repo::{ProductRepository, SqliteProductRepository};
use crate::repo::{count_rows, Entity, RepoError, RepoResult};
use crate::service::fixtures::fixture_entries;
use crate::service::seed::{seed_entry, CatalogEntry, SeedError, SeedStep, SeededEntry};
use log::{error, info, warn};
use rusqlite::Connection;

/// Owned handle over the catalog database.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Opens (creating if absent) the configured database and ensures the schema.
    ///
    /// # Errors
    /// - `DbError::Sqlite` when the file cannot be opened or configured.
    /// - `DbError::UnsupportedSchemaVersion` for databases from a newer build.
    /// - `DbError::IncompatibleSchema` for files whose tables use other column names.
    pub fn open(config: &StoreConfig) -> DbResult<Self> {
        let conn = open_db(&config.db_path)?;
        Ok(Self { conn })
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self { conn })
    }

    /// Borrows the underlying connection.
    ///
    /// Statements run through it skip validation, reference pre-checks and
    /// logging; only the engine constraints still apply.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates missing catalog tables. Idempotent.
    pub fn ensure_schema(&mut self) -> DbResult<()> {
        ensure_schema(&mut self.conn)
    }

    pub fn add_customer(&self, customer: &NewCustomer) -> RepoResult<CustomerId> {
        let result = SqliteCustomerRepository::new(&self.conn).create_customer(customer);
        log_write("add_customer", Entity::Customer, result)
    }

    /// Removes a customer by login. Blocked while any order references it.
    pub fn remove_customer(&self, login: &str) -> RepoResult<()> {
        let result = SqliteCustomerRepository::new(&self.conn).delete_customer(login);
        log_write("remove_customer", Entity::Customer, result).map(|_| ())
    }

    pub fn get_customer(&self, login: &str) -> RepoResult<Option<Customer>> {
        SqliteCustomerRepository::new(&self.conn).get_customer(login)
    }

    /// Inserts an image and returns its id; `.ok()` yields the optional id.
    pub fn add_image(&self, path: &str) -> RepoResult<ImageId> {
        let result = SqliteImageRepository::new(&self.conn).create_image(path);
        log_write("add_image", Entity::Image, result)
    }

    pub fn delete_image(&self, id: ImageId) -> RepoResult<()> {
        let result = SqliteImageRepository::new(&self.conn)
            .delete_image(id)
            .map(|()| id);
        log_write("delete_image", Entity::Image, result).map(|_| ())
    }

    pub fn get_image(&self, id: ImageId) -> RepoResult<Option<Image>> {
        SqliteImageRepository::new(&self.conn).get_image(id)
    }

    pub fn add_category(&self, category: &NewCategory) -> RepoResult<CategoryId> {
        let result = SqliteCategoryRepository::new(&self.conn).create_category(category);
        log_write("add_category", Entity::Category, result)
    }

    pub fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        let result = SqliteCategoryRepository::new(&self.conn)
            .delete_category(id)
            .map(|()| id);
        log_write("delete_category", Entity::Category, result).map(|_| ())
    }

    pub fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        SqliteCategoryRepository::new(&self.conn).get_category(id)
    }

    pub fn get_category_by_type(&self, kind: CategoryType) -> RepoResult<Option<Category>> {
        SqliteCategoryRepository::new(&self.conn).get_category_by_type(kind)
    }

    /// Lists all categories ordered by type.
    pub fn list_categories(&self) -> RepoResult<Vec<Category>> {
        SqliteCategoryRepository::new(&self.conn).list_categories()
    }

    pub fn add_product(&self, product: &NewProduct) -> RepoResult<ProductId> {
        let result = SqliteProductRepository::new(&self.conn).create_product(product);
        log_write("add_product", Entity::Product, result)
    }

    /// Deletes a product. Blocked while any order references it.
    pub fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        let result = SqliteProductRepository::new(&self.conn)
            .delete_product(id)
            .map(|()| id);
        log_write("delete_product", Entity::Product, result).map(|_| ())
    }

    pub fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        SqliteProductRepository::new(&self.conn).get_product(id)
    }

    pub fn list_products(&self, category_id: Option<CategoryId>) -> RepoResult<Vec<Product>> {
        SqliteProductRepository::new(&self.conn).list_products(category_id)
    }

    pub fn add_order(&self, order: &NewOrder) -> RepoResult<OrderId> {
        let result = SqliteOrderRepository::new(&self.conn).create_order(order);
        log_write("add_order", Entity::Order, result)
    }

    pub fn delete_order(&self, id: OrderId) -> RepoResult<()> {
        let result = SqliteOrderRepository::new(&self.conn)
            .delete_order(id)
            .map(|()| id);
        log_write("delete_order", Entity::Order, result).map(|_| ())
    }

    pub fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>> {
        SqliteOrderRepository::new(&self.conn).get_order(id)
    }

    /// Writes an image, a category using it and a product in that category.
    ///
    /// All-or-nothing: on any failure no row from this call remains.
    pub fn add_image_category_product(
        &mut self,
        entry: &CatalogEntry,
    ) -> Result<SeededEntry, SeedError> {
        match seed_entry(&mut self.conn, entry) {
            Ok(seeded) => {
                info!(
                    "event=seed_entry module=store status=ok image_id={} category_id={} product_id={}",
                    seeded.image_id, seeded.category_id, seeded.product_id
                );
                Ok(seeded)
            }
            Err(err) => {
                let step = err.step.as_str();
                if is_expected(&err.source) {
                    warn!(
                        "event=seed_entry module=store status=rejected step={} error_code={} error={}",
                        step,
                        err.source.code(),
                        err.source
                    );
                } else {
                    error!(
                        "event=seed_entry module=store status=error step={} error_code={} error={}",
                        step,
                        err.source.code(),
                        err.source
                    );
                }
                Err(err)
            }
        }
    }

    /// Deletes every row from all five tables.
    ///
    /// Tables are emptied in `Entity::ALL` order inside one transaction with
    /// foreign-key checks deferred to commit.
    pub fn clear_tables(&mut self) -> RepoResult<()> {
        let result = clear_all(&mut self.conn);
        match &result {
            Ok(()) => info!("event=clear_tables module=store status=ok"),
            Err(err) => error!(
                "event=clear_tables module=store status=error error_code={} error={}",
                err.code(),
                err
            ),
        }
        result
    }

    /// Resets the catalog to the demo brooches.
    ///
    /// Destructive: clears every table first. Meant for demo/test setup only.
    pub fn load_fixture_data(&mut self) -> Result<Vec<SeededEntry>, SeedError> {
        self.clear_tables().map_err(|source| SeedError {
            step: SeedStep::Transaction,
            source,
        })?;

        let entries = fixture_entries();
        let mut seeded = Vec::with_capacity(entries.len());
        for entry in &entries {
            seeded.push(self.add_image_category_product(entry)?);
        }

        info!(
            "event=load_fixtures module=store status=ok entries={}",
            seeded.len()
        );
        Ok(seeded)
    }

    /// Number of rows currently stored for one entity.
    pub fn row_count(&self, entity: Entity) -> RepoResult<u64> {
        count_rows(&self.conn, entity)
    }

    /// Releases the connection. Dropping the store does the same, minus the error.
    pub fn close_connection(self) -> DbResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!(
                    "event=db_close module=db status=error error_code=db_close_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }
}

fn clear_all(conn: &mut Connection) -> RepoResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch("PRAGMA defer_foreign_keys = ON;")?;
    for entity in Entity::ALL {
        tx.execute(&format!("DELETE FROM {};", entity.table()), [])?;
    }
    tx.commit()?;
    Ok(())
}

/// Failures the caller is expected to branch on, as opposed to storage faults.
fn is_expected(err: &RepoError) -> bool {
    !matches!(err, RepoError::Db(_) | RepoError::InvalidData(_))
}

fn log_write(
    operation: &'static str,
    entity: Entity,
    result: RepoResult<i64>,
) -> RepoResult<i64> {
    match &result {
        Ok(id) => info!(
            "event={} module=store status=ok entity={} id={}",
            operation, entity, id
        ),
        Err(err) if is_expected(err) => warn!(
            "event={} module=store status=rejected entity={} error_code={} error={}",
            operation,
            entity,
            err.code(),
            err
        ),
        Err(err) => error!(
            "event={} module=store status=error entity={} error_code={} error={}",
            operation,
            entity,
            err.code(),
            err
        ),
    }
    result
}
