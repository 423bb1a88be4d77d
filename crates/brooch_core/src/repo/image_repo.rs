//! Image repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `ImagePath` is unique.
//! - An image used by a category or product cannot be deleted.

use crate::model::image::{validate_image_path, Image, ImageId};
use crate::repo::{
    ensure_unreferenced, map_delete_error, map_insert_error, Entity, RepoError, RepoResult,
};
use rusqlite::{Connection, OptionalExtension};

/// Repository interface for image references.
pub trait ImageRepository {
    fn create_image(&self, path: &str) -> RepoResult<ImageId>;
    fn get_image(&self, id: ImageId) -> RepoResult<Option<Image>>;
    fn delete_image(&self, id: ImageId) -> RepoResult<()>;
}

/// SQLite-backed image repository.
pub struct SqliteImageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteImageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ImageRepository for SqliteImageRepository<'_> {
    fn create_image(&self, path: &str) -> RepoResult<ImageId> {
        validate_image_path(path)?;

        self.conn
            .execute("INSERT INTO Images (ImagePath) VALUES (?1);", [path])
            .map_err(|err| map_insert_error(err, Entity::Image, "path"))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_image(&self, id: ImageId) -> RepoResult<Option<Image>> {
        let image = self
            .conn
            .query_row(
                "SELECT Id, ImagePath FROM Images WHERE Id = ?1;",
                [id],
                |row| {
                    Ok(Image {
                        id: row.get("Id")?,
                        path: row.get("ImagePath")?,
                    })
                },
            )
            .optional()?;
        Ok(image)
    }

    fn delete_image(&self, id: ImageId) -> RepoResult<()> {
        ensure_unreferenced(self.conn, Entity::Image, id, Entity::Category, "ImageId")?;
        ensure_unreferenced(self.conn, Entity::Image, id, Entity::Product, "ImageId")?;

        let changed = self
            .conn
            .execute("DELETE FROM Images WHERE Id = ?1;", [id])
            .map_err(|err| map_delete_error(err, Entity::Image, id))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Image,
                key: format!("id={id}"),
            });
        }

        Ok(())
    }
}
