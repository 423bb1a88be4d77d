//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register catalog schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Recreate dropped catalog tables and reject foreign table layouts.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Migration SQL only uses `IF NOT EXISTS` DDL, so re-running is harmless.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Columns the repositories query by name, grouped per table.
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("Customers", &["Id", "Login", "Password", "Admin"]),
    ("Images", &["Id", "ImagePath"]),
    ("Categories", &["Id", "Type", "Name", "ImageId"]),
    (
        "Products",
        &[
            "Id",
            "Name",
            "Description",
            "Price",
            "QuantityInStock",
            "QuantityPurchased",
            "CategoryId",
            "ImageId",
        ],
    ),
    (
        "Orders",
        &[
            "Id",
            "Price",
            "UserName",
            "UserAddress",
            "DeliveryType",
            "CustomerId",
            "ProductId",
        ],
    ),
];

/// Applies all pending migrations on the provided connection.
///
/// When the version is current but a catalog table is gone, every migration
/// is replayed to recreate it.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database was written by a newer
///   binary; nothing is touched in that case.
/// - `IncompatibleSchema` when a pre-existing table lacks a required column;
///   the transaction is rolled back and the version stays unstamped.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    let replay = has_missing_table(conn)?;
    if current_version == latest && !replay {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version && !replay {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    check_required_columns(&tx)?;
    tx.commit()?;

    Ok(())
}

fn has_missing_table(conn: &Connection) -> DbResult<bool> {
    for (table, _) in REQUIRED_COLUMNS {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            return Ok(true);
        }
    }
    Ok(false)
}

fn check_required_columns(conn: &Connection) -> DbResult<()> {
    for (table, columns) in REQUIRED_COLUMNS {
        for column in *columns {
            let present: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2);",
                [table, column],
                |row| row.get(0),
            )?;
            if !present {
                return Err(DbError::IncompatibleSchema {
                    table: *table,
                    column: *column,
                });
            }
        }
    }
    Ok(())
}

/// Reads the schema version stamped on the database.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
