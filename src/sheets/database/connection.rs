// src/sheets/database/connection.rs

use super::error::DbResult;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

pub struct DbConnection;

impl DbConnection {
    /// Creates a new workbook database with WAL mode enabled and the
    /// workbook-level bookkeeping tables in place.
    pub fn create_new(path: &Path) -> DbResult<Connection> {
        let conn = Connection::open(path)?;

        let journal_mode: String = conn.query_row(
            "PRAGMA journal_mode=WAL",
            [],
            |row| row.get(0)
        )?;

        if journal_mode.to_uppercase() != "WAL" {
            tracing::error!(
                "Failed to set WAL mode on new workbook {:?}. Current mode: {}",
                path.file_name(),
                journal_mode
            );
        } else {
            tracing::info!("WAL mode activated for new workbook {:?}", path.file_name());
        }

        Self::apply_pragmas(&conn)?;
        super::schema::ensure_workbook_tables(&conn)?;

        Ok(conn)
    }

    /// Opens an existing workbook. The file is never created here: a missing
    /// workbook surfaces as an open error to the caller.
    pub fn open_existing(path: &Path) -> DbResult<Connection> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // PRAGMA settings are per connection, so WAL is requested on every open
        let journal_mode: String = conn.query_row(
            "PRAGMA journal_mode=WAL",
            [],
            |row| row.get(0)
        )?;

        if journal_mode.to_uppercase() != "WAL" {
            tracing::warn!(
                "Failed to set WAL mode on workbook {:?}. Current mode: {}. The file may be in use by another connection.",
                path.file_name(),
                journal_mode
            );
        } else {
            tracing::debug!("WAL mode activated for workbook {:?}", path.file_name());
        }

        Self::apply_pragmas(&conn)?;
        super::schema::ensure_workbook_tables(&conn)?;

        Ok(conn)
    }

    /// In-memory workbook, used by tests and dry runs.
    pub fn open_in_memory() -> DbResult<Connection> {
        let conn = Connection::open_in_memory()?;
        Self::apply_pragmas(&conn)?;
        super::schema::ensure_workbook_tables(&conn)?;
        Ok(conn)
    }

    fn apply_pragmas(conn: &Connection) -> DbResult<()> {
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(Duration::from_millis(5000))?;
        Ok(())
    }
}
