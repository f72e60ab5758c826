// src/sheets/database/schema.rs
// Table layout of a workbook file.
//
// Every workbook carries two bookkeeping tables:
//   _Metadata  one row per sheet
//   _Filters   one row per sheet that has a filter (its covered range)
// Every sheet is a data table plus a `<sheet>_Metadata` table that holds the
// header (column_index order) and the per-column filter criteria.

use rusqlite::Connection;

use super::error::{DbError, DbResult};
use super::writer::helpers::{metadata_table_name, quote_identifier};

/// Physical columns every sheet table carries besides its header columns.
pub const TECHNICAL_COLUMNS: [&str; 4] = ["id", "row_index", "created_at", "updated_at"];

pub fn ensure_workbook_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _Metadata (
            table_name TEXT PRIMARY KEY,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP
        );
        CREATE TABLE IF NOT EXISTS _Filters (
            table_name TEXT PRIMARY KEY,
            last_row INTEGER NOT NULL,
            last_column INTEGER NOT NULL,
            updated_at TEXT DEFAULT CURRENT_TIMESTAMP
        );",
    )?;
    Ok(())
}

/// Reject headers that cannot become physical columns.
pub fn validate_headers(sheet: &str, headers: &[String]) -> DbResult<()> {
    if sheet.trim().is_empty() || sheet.starts_with('_') {
        return Err(DbError::InvalidMetadata(format!(
            "'{}' is not a usable sheet name",
            sheet
        )));
    }
    if sheet.ends_with("_Metadata") {
        return Err(DbError::InvalidMetadata(format!(
            "sheet name '{}' collides with a metadata table",
            sheet
        )));
    }

    let mut seen = std::collections::HashSet::new();
    for header in headers {
        if header.is_empty() {
            return Err(DbError::InvalidMetadata(format!(
                "sheet '{}' has an empty header cell",
                sheet
            )));
        }
        if TECHNICAL_COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(header)) {
            return Err(DbError::InvalidMetadata(format!(
                "header '{}' is reserved",
                header
            )));
        }
        if !seen.insert(header.to_lowercase()) {
            return Err(DbError::InvalidMetadata(format!(
                "header '{}' appears twice in sheet '{}'",
                header, sheet
            )));
        }
    }
    Ok(())
}

/// Create the data and column tables for a new sheet.
pub fn create_sheet_tables(conn: &Connection, sheet: &str, headers: &[String]) -> DbResult<()> {
    validate_headers(sheet, headers)?;

    let mut col_defs = vec![
        "id INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
        "row_index INTEGER NOT NULL UNIQUE".to_string(),
    ];
    for header in headers {
        col_defs.push(format!("{} TEXT", quote_identifier(header)));
    }
    col_defs.push("created_at TEXT DEFAULT CURRENT_TIMESTAMP".to_string());
    col_defs.push("updated_at TEXT DEFAULT CURRENT_TIMESTAMP".to_string());

    let index_name = quote_identifier(&format!("idx_{}_row_index", sheet.replace(' ', "_")));
    let sql = format!(
        "CREATE TABLE {table} ({cols});
         CREATE INDEX IF NOT EXISTS {index} ON {table}(row_index);
         CREATE TABLE {meta} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            column_index INTEGER UNIQUE NOT NULL,
            column_name TEXT UNIQUE NOT NULL,
            filter_expr TEXT,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT DEFAULT CURRENT_TIMESTAMP
         );",
        table = quote_identifier(sheet),
        cols = col_defs.join(", "),
        index = index_name,
        meta = quote_identifier(&metadata_table_name(sheet)),
    );
    conn.execute_batch(&sql)?;
    tracing::debug!("Created tables for sheet '{}' ({} columns)", sheet, headers.len());
    Ok(())
}

/// Check if a table exists in the workbook
pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Verify table exists or return error
pub fn require_table(conn: &Connection, table_name: &str) -> DbResult<()> {
    if !table_exists(conn, table_name)? {
        return Err(DbError::TableNotFound(table_name.to_string()));
    }
    Ok(())
}
