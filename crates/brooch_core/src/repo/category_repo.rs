//! Category repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `Type` is unique.
//! - `ImageId`, when set, must name an existing image.
//! - A category holding products cannot be deleted.

use crate::model::category::{Category, CategoryId, CategoryType, NewCategory};
use crate::repo::{
    ensure_unreferenced, map_delete_error, map_insert_error, require_row, Entity, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT Id, Type, Name, ImageId FROM Categories";

/// Repository interface for brooch categories.
pub trait CategoryRepository {
    fn create_category(&self, category: &NewCategory) -> RepoResult<CategoryId>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    fn get_category_by_type(&self, kind: CategoryType) -> RepoResult<Option<Category>>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn delete_category(&self, id: CategoryId) -> RepoResult<()>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_one(&self, filter: &str, value: i64) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE {filter} = ?1;"))?;
        let mut rows = stmt.query([value])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }
        Ok(None)
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, category: &NewCategory) -> RepoResult<CategoryId> {
        if let Some(image_id) = category.image_id {
            require_row(self.conn, Entity::Image, image_id)?;
        }

        self.conn
            .execute(
                "INSERT INTO Categories (Type, Name, ImageId) VALUES (?1, ?2, ?3);",
                params![category.kind.0, category.name.as_str(), category.image_id],
            )
            .map_err(|err| map_insert_error(err, Entity::Category, "type"))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        self.query_one("Id", id)
    }

    fn get_category_by_type(&self, kind: CategoryType) -> RepoResult<Option<Category>> {
        self.query_one("Type", kind.0)
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY Type ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        ensure_unreferenced(self.conn, Entity::Category, id, Entity::Product, "CategoryId")?;

        let changed = self
            .conn
            .execute("DELETE FROM Categories WHERE Id = ?1;", [id])
            .map_err(|err| map_delete_error(err, Entity::Category, id))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Category,
                key: format!("id={id}"),
            });
        }

        Ok(())
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    Ok(Category {
        id: row.get("Id")?,
        kind: CategoryType(row.get("Type")?),
        name: row.get("Name")?,
        image_id: row.get("ImageId")?,
    })
}
