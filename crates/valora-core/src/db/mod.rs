//! Database operations and SQLite management for leads and tasks.
//!
//! This module provides low-level database operations for the valora CRM. It
//! handles SQLite connections, schema management, and the query interfaces
//! for leads and their task checklists.

use std::path::Path;

use rusqlite::{types::Type, Connection};

use crate::error::{DatabaseResultExt, Result};

pub mod lead_queries;
pub mod migrations;
pub mod task_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Parse a text column with `FromStr`, reporting failures as a conversion
/// error on that column.
pub(crate) fn parse_column<T>(row: &rusqlite::Row, index: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.to_string().into())
    })
}

/// [`parse_column`] for nullable columns.
pub(crate) fn parse_optional_column<T>(
    row: &rusqlite::Row,
    index: usize,
) -> rusqlite::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = row.get(index)?;
    raw.map(|raw| {
        raw.parse::<T>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.to_string().into())
        })
    })
    .transpose()
}
