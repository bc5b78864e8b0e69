use anyhow::{Context, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;

use super::schema::{SCHEMA, TABLES_IN_DELETE_ORDER};
use crate::error::SeedError;

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database wrapper around a single pooled SQLite connection.
///
/// The pool is capped at one connection: the seeder runs one transaction on
/// one connection, and an in-memory database only lives as long as the
/// connection that created it.
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Open (or create) the database at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let manager = Self::create_connection_manager(path)?
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .context("Failed to create database connection pool")?;
        Ok(Self { pool })
    }

    /// Create appropriate connection manager based on path
    ///
    /// # Arguments
    /// * `path` - Database file path or ":memory:" for in-memory database
    fn create_connection_manager<P: AsRef<Path>>(path: P) -> Result<SqliteConnectionManager> {
        let path_str = path.as_ref().to_string_lossy();
        let trimmed_path = path_str.trim();

        if trimmed_path.eq_ignore_ascii_case(MEMORY_DB_PATH) {
            Ok(SqliteConnectionManager::memory())
        } else {
            Ok(SqliteConnectionManager::file(path))
        }
    }

    /// Create an in-memory database (useful for testing)
    pub fn in_memory() -> Result<Self> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Create any missing tables from the reference schema
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize database schema")?;
        Ok(())
    }

    /// Fail with [`SeedError::MissingTables`] unless every seeded table exists
    pub fn validate_schema(&self) -> Result<()> {
        let conn = self.connection()?;
        let missing = missing_tables(&conn)?;
        if !missing.is_empty() {
            return Err(SeedError::MissingTables(missing).into());
        }
        Ok(())
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }
}

/// Names of seeded tables that do not exist in the connected database
pub fn missing_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
        .context("Failed to prepare schema lookup")?;

    let mut missing = Vec::new();
    for table in TABLES_IN_DELETE_ORDER {
        let count: i64 = stmt
            .query_row([table], |row| row.get(0))
            .with_context(|| format!("Failed to check for {} table", table))?;
        if count == 0 {
            missing.push(table.to_string());
        }
    }
    Ok(missing)
}
