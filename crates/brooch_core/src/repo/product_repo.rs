//! Product repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `CategoryId` and `ImageId` must name existing rows.
//! - `Price` text round-trips byte for byte.
//! - A product referenced by any order cannot be deleted.

use crate::model::category::CategoryId;
use crate::model::product::{NewProduct, Product, ProductId};
use crate::repo::{
    ensure_unreferenced, map_delete_error, map_insert_error, quantity_from_db, require_row, Entity,
    RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const PRODUCT_SELECT_SQL: &str = "SELECT
    Id,
    Name,
    Description,
    Price,
    QuantityInStock,
    QuantityPurchased,
    CategoryId,
    ImageId
FROM Products";

/// Repository interface for brooch products.
pub trait ProductRepository {
    fn create_product(&self, product: &NewProduct) -> RepoResult<ProductId>;
    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>>;
    /// Lists products ordered by id, optionally restricted to one category.
    fn list_products(&self, category_id: Option<CategoryId>) -> RepoResult<Vec<Product>>;
    fn delete_product(&self, id: ProductId) -> RepoResult<()>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn create_product(&self, product: &NewProduct) -> RepoResult<ProductId> {
        require_row(self.conn, Entity::Category, product.category_id)?;
        require_row(self.conn, Entity::Image, product.image_id)?;

        self.conn
            .execute(
                "INSERT INTO Products (
                    Name,
                    Description,
                    Price,
                    QuantityInStock,
                    QuantityPurchased,
                    CategoryId,
                    ImageId
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    product.name.as_str(),
                    product.description.as_str(),
                    product.price.as_str(),
                    i64::from(product.quantity_in_stock),
                    i64::from(product.quantity_purchased),
                    product.category_id,
                    product.image_id,
                ],
            )
            .map_err(|err| map_insert_error(err, Entity::Product, "id"))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE Id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }
        Ok(None)
    }

    fn list_products(&self, category_id: Option<CategoryId>) -> RepoResult<Vec<Product>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PRODUCT_SELECT_SQL}
             WHERE (?1 IS NULL OR CategoryId = ?1)
             ORDER BY Id ASC;"
        ))?;
        let mut rows = stmt.query([category_id])?;
        let mut products = Vec::new();
        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }
        Ok(products)
    }

    fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        ensure_unreferenced(self.conn, Entity::Product, id, Entity::Order, "ProductId")?;

        let changed = self
            .conn
            .execute("DELETE FROM Products WHERE Id = ?1;", [id])
            .map_err(|err| map_delete_error(err, Entity::Product, id))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Product,
                key: format!("id={id}"),
            });
        }

        Ok(())
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    Ok(Product {
        id: row.get("Id")?,
        name: row.get("Name")?,
        description: row.get("Description")?,
        price: row.get("Price")?,
        quantity_in_stock: quantity_from_db(
            row.get("QuantityInStock")?,
            "Products.QuantityInStock",
        )?,
        quantity_purchased: quantity_from_db(
            row.get("QuantityPurchased")?,
            "Products.QuantityPurchased",
        )?,
        category_id: row.get("CategoryId")?,
        image_id: row.get("ImageId")?,
    })
}
