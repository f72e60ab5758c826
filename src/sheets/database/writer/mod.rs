// src/sheets/database/writer/mod.rs
// All data-modifying statements against a workbook live in this module.

pub mod helpers;
mod updates;

#[cfg(test)]
pub mod test_helpers;

use rusqlite::{params, Connection};

use super::error::DbResult;
use super::schema;
use crate::sheets::definitions::SheetFilter;
use helpers::{build_insert_sql, metadata_table_name, quote_identifier};

pub use updates::update_cell;

pub struct DbWriter;

impl DbWriter {
    /// Create a sheet: data table, column metadata and registry row.
    pub fn create_sheet(conn: &Connection, sheet: &str, headers: &[String]) -> DbResult<()> {
        let tx = conn.unchecked_transaction()?;
        schema::create_sheet_tables(&tx, sheet, headers)?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (column_index, column_name) VALUES (?, ?)",
                quote_identifier(&metadata_table_name(sheet))
            ))?;
            for (idx, header) in headers.iter().enumerate() {
                stmt.execute(params![idx as i64, header])?;
            }
        }
        tx.execute("INSERT INTO _Metadata (table_name) VALUES (?)", [sheet])?;
        tx.commit()?;

        tracing::info!("Created sheet '{}' with {} columns", sheet, headers.len());
        Ok(())
    }

    /// Append a data row after the last one. Values beyond the header width
    /// are dropped; missing ones are stored empty. Returns the spreadsheet
    /// row number of the new row.
    pub fn append_row(conn: &Connection, sheet: &str, values: &[String]) -> DbResult<usize> {
        schema::require_table(conn, sheet)?;
        let header = super::reader::DbReader::read_header(conn, sheet)?;

        if values.len() > header.len() {
            tracing::warn!(
                "append_row: '{}' has {} columns, dropping {} extra values",
                sheet,
                header.len(),
                values.len() - header.len()
            );
        }

        let tx = conn.unchecked_transaction()?;
        let next_index: i64 = tx.query_row(
            &format!(
                "SELECT COALESCE(MAX(row_index), -1) + 1 FROM {}",
                quote_identifier(sheet)
            ),
            [],
            |row| row.get(0),
        )?;

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(next_index)];
        for i in 0..header.len() {
            params.push(Box::new(values.get(i).cloned().unwrap_or_default()));
        }
        tx.execute(
            &build_insert_sql(sheet, &header),
            rusqlite::params_from_iter(params.iter()),
        )?;

        let row_count: i64 = tx.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_identifier(sheet)),
            [],
            |row| row.get(0),
        )?;
        tx.commit()?;

        Ok(row_count.max(0) as usize + 1)
    }

    /// Store a filter: its range in `_Filters` and one JSON criteria document
    /// per filtered column in the column metadata. Replaces any previous
    /// filter of the sheet.
    pub fn write_filter(conn: &Connection, sheet: &str, filter: &SheetFilter) -> DbResult<()> {
        let header = super::reader::DbReader::read_header(conn, sheet)?;
        let meta_table = quote_identifier(&metadata_table_name(sheet));

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO _Filters (table_name, last_row, last_column) VALUES (?, ?, ?)
             ON CONFLICT(table_name) DO UPDATE SET
                last_row = excluded.last_row,
                last_column = excluded.last_column,
                updated_at = CURRENT_TIMESTAMP",
            params![sheet, filter.last_row as i64, filter.last_column as i64],
        )?;
        tx.execute(&format!("UPDATE {} SET filter_expr = NULL", meta_table), [])?;

        {
            let mut stmt = tx.prepare(&format!(
                "UPDATE {} SET filter_expr = ?, updated_at = CURRENT_TIMESTAMP WHERE column_name = ?",
                meta_table
            ))?;
            for (&column, criteria) in &filter.criteria {
                let Some(column_name) = column.checked_sub(1).and_then(|i| header.get(i)) else {
                    tracing::warn!(
                        "write_filter: '{}' has no column {}, criteria dropped",
                        sheet,
                        column
                    );
                    continue;
                };
                let expr = serde_json::to_string(criteria)?;
                stmt.execute(params![expr, column_name])?;
            }
        }
        tx.commit()?;

        tracing::debug!(
            "write_filter: '{}' rows 1..={} columns 1..={}, {} criteria",
            sheet,
            filter.last_row,
            filter.last_column,
            filter.criteria.len()
        );
        Ok(())
    }

    /// Remove a sheet's filter together with all of its column criteria.
    pub fn remove_filter(conn: &Connection, sheet: &str) -> DbResult<()> {
        let meta_table = quote_identifier(&metadata_table_name(sheet));

        let tx = conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM _Filters WHERE table_name = ?", [sheet])?;
        tx.execute(&format!("UPDATE {} SET filter_expr = NULL", meta_table), [])?;
        tx.commit()?;

        if removed > 0 {
            tracing::debug!("remove_filter: filter on '{}' removed", sheet);
        }
        Ok(())
    }
}
