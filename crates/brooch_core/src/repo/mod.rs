//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts for the catalog tables.
//! - Isolate SQLite query details from store orchestration.
//! - Translate engine constraint failures into semantic errors.
//!
//! # Invariants
//! - Write paths validate input and check referenced ids before SQL mutations.
//! - Deletes never cascade; a referenced row is reported, not removed.
//! - Repository APIs return semantic errors (`Duplicate`, `NotFound`,
//!   `Referenced`, `MissingReference`) in addition to DB transport errors.

use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::{ffi, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod customer_repo;
pub mod image_repo;
pub mod order_repo;
pub mod product_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// The five catalog tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Customer,
    Image,
    Category,
    Product,
    Order,
}

impl Entity {
    /// All entities in bulk-clear order.
    pub const ALL: [Entity; 5] = [
        Entity::Customer,
        Entity::Image,
        Entity::Category,
        Entity::Product,
        Entity::Order,
    ];

    /// SQL table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Customer => "Customers",
            Self::Image => "Images",
            Self::Category => "Categories",
            Self::Product => "Products",
            Self::Order => "Orders",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Image => "image",
            Self::Category => "category",
            Self::Product => "product",
            Self::Order => "order",
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// A unique column already holds the value.
    Duplicate {
        entity: Entity,
        field: &'static str,
    },
    /// The row is still referenced and cannot be deleted.
    Referenced {
        entity: Entity,
        id: i64,
        by: Option<Entity>,
    },
    /// An insert points at a row that does not exist.
    MissingReference { entity: Entity, id: i64 },
    NotFound { entity: Entity, key: String },
    InvalidData(String),
}

impl RepoError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Db(_) => "db",
            Self::Duplicate { .. } => "duplicate",
            Self::Referenced { .. } => "referenced",
            Self::MissingReference { .. } => "missing_reference",
            Self::NotFound { .. } => "not_found",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Duplicate { entity, field } => {
                write!(f, "{entity} with the same {field} already exists")
            }
            Self::Referenced { entity, id, by } => match by {
                Some(by) => write!(f, "{entity} {id} is still referenced by {}", by.table()),
                None => write!(f, "{entity} {id} is still referenced"),
            },
            Self::MissingReference { entity, id } => {
                write!(f, "referenced {entity} {id} does not exist")
            }
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Duplicate { .. }
            | Self::Referenced { .. }
            | Self::MissingReference { .. }
            | Self::NotFound { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Counts all rows of one catalog table.
pub fn count_rows(conn: &Connection, entity: Entity) -> RepoResult<u64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {};", entity.table()),
        [],
        |row| row.get(0),
    )?;
    u64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative row count for {}", entity.table())))
}

/// Returns whether a row with `id` exists in the entity's table.
pub(crate) fn row_exists(conn: &Connection, entity: Entity, id: i64) -> RepoResult<bool> {
    let found = conn
        .query_row(
            &format!("SELECT 1 FROM {} WHERE Id = ?1;", entity.table()),
            [id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Fails with `MissingReference` unless `id` exists in the entity's table.
pub(crate) fn require_row(conn: &Connection, entity: Entity, id: i64) -> RepoResult<()> {
    if row_exists(conn, entity, id)? {
        return Ok(());
    }
    Err(RepoError::MissingReference { entity, id })
}

/// Fails with `Referenced` when any row of `by` points at `id` through `column`.
pub(crate) fn ensure_unreferenced(
    conn: &Connection,
    entity: Entity,
    id: i64,
    by: Entity,
    column: &str,
) -> RepoResult<()> {
    let found = conn
        .query_row(
            &format!("SELECT 1 FROM {} WHERE {column} = ?1 LIMIT 1;", by.table()),
            [id],
            |_| Ok(()),
        )
        .optional()?;
    if found.is_some() {
        return Err(RepoError::Referenced {
            entity,
            id,
            by: Some(by),
        });
    }
    Ok(())
}

/// Maps a failed INSERT, turning unique-constraint hits into `Duplicate`.
pub(crate) fn map_insert_error(
    err: rusqlite::Error,
    entity: Entity,
    unique_field: &'static str,
) -> RepoError {
    match extended_code(&err) {
        Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => RepoError::Duplicate {
            entity,
            field: unique_field,
        },
        _ => err.into(),
    }
}

/// Maps a failed DELETE, turning foreign-key hits into `Referenced`.
///
/// Only reached when the engine catches a reference the pre-checks missed, so
/// the referencing table is unknown.
pub(crate) fn map_delete_error(err: rusqlite::Error, entity: Entity, id: i64) -> RepoError {
    match extended_code(&err) {
        Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => RepoError::Referenced {
            entity,
            id,
            by: None,
        },
        _ => err.into(),
    }
}

fn extended_code(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => Some(failure.extended_code),
        _ => None,
    }
}

/// Converts a stored quantity into `u32`, rejecting negative or oversized values.
pub(crate) fn quantity_from_db(value: i64, column: &str) -> RepoResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid quantity `{value}` in {column}")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn bool_from_int(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
