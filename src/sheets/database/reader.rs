// src/sheets/database/reader.rs
// Read-only queries against a workbook

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension};

use super::error::{DbError, DbResult};
use super::schema;
use super::writer::helpers::{build_select_rows_sql, metadata_table_name, quote_identifier};
use crate::sheets::definitions::{FilterCriteria, SheetFilter, TableSnapshot};

pub struct DbReader;

impl DbReader {
    /// Sheet names in creation order
    pub fn sheet_names(conn: &Connection) -> DbResult<Vec<String>> {
        let mut stmt = conn.prepare("SELECT table_name FROM _Metadata ORDER BY rowid")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn sheet_exists(conn: &Connection, sheet: &str) -> DbResult<bool> {
        let registered: Option<String> = conn
            .query_row(
                "SELECT table_name FROM _Metadata WHERE table_name = ?",
                [sheet],
                |row| row.get(0),
            )
            .optional()?;
        if registered.is_none() {
            return Ok(false);
        }
        schema::table_exists(conn, sheet)
    }

    /// Header row: column names in column_index order.
    pub fn read_header(conn: &Connection, sheet: &str) -> DbResult<Vec<String>> {
        let meta_table = metadata_table_name(sheet);
        schema::require_table(conn, &meta_table)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT column_name FROM {} ORDER BY column_index",
            quote_identifier(&meta_table)
        ))?;
        let header = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(header)
    }

    /// Full snapshot of a sheet: header plus every data row in row order.
    pub fn read_snapshot(conn: &Connection, sheet: &str) -> DbResult<TableSnapshot> {
        schema::require_table(conn, sheet)?;
        let header = Self::read_header(conn, sheet)?;

        let mut stmt = conn.prepare(&build_select_rows_sql(sheet, &header))?;
        let width = header.len();
        let rows = stmt
            .query_map([], |row| {
                let mut cells = Vec::with_capacity(width);
                for i in 0..width {
                    cells.push(cell_to_string(row.get_ref(i + 1)?));
                }
                Ok(cells)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "read_snapshot: '{}' -> {} columns, {} data rows",
            sheet,
            width,
            rows.len()
        );
        Ok(TableSnapshot::new(sheet, header, rows))
    }

    pub fn data_row_count(conn: &Connection, sheet: &str) -> DbResult<usize> {
        schema::require_table(conn, sheet)?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_identifier(sheet)),
            [],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as usize)
    }

    /// `row_index` of the data row shown at a spreadsheet row (>= 2).
    pub fn row_index_at(conn: &Connection, sheet: &str, row: usize) -> DbResult<Option<i64>> {
        let Some(offset) = row.checked_sub(2) else {
            return Ok(None);
        };
        let row_index = conn
            .query_row(
                &format!(
                    "SELECT row_index FROM {} ORDER BY row_index LIMIT 1 OFFSET ?",
                    quote_identifier(sheet)
                ),
                [offset as i64],
                |r| r.get::<_, i64>(0),
            )
            .optional()?;
        Ok(row_index)
    }

    /// Name of the header column at a 1-based position.
    pub fn column_name_at(conn: &Connection, sheet: &str, column: usize) -> DbResult<String> {
        let header = Self::read_header(conn, sheet)?;
        column
            .checked_sub(1)
            .and_then(|i| header.get(i).cloned())
            .ok_or_else(|| DbError::ColumnOutOfRange {
                sheet: sheet.to_string(),
                column,
            })
    }

    /// Filter of a sheet, if one exists. Criteria are keyed by the column's
    /// current header position.
    pub fn read_filter(conn: &Connection, sheet: &str) -> DbResult<Option<SheetFilter>> {
        let range: Option<(i64, i64)> = conn
            .query_row(
                "SELECT last_row, last_column FROM _Filters WHERE table_name = ?",
                [sheet],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((last_row, last_column)) = range else {
            return Ok(None);
        };

        let meta_table = metadata_table_name(sheet);
        let mut stmt = conn.prepare(&format!(
            "SELECT column_name, filter_expr FROM {} ORDER BY column_index",
            quote_identifier(&meta_table)
        ))?;
        let columns = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut filter = SheetFilter {
            last_row: last_row.max(0) as usize,
            last_column: last_column.max(0) as usize,
            criteria: Default::default(),
        };
        for (position, (column_name, expr)) in columns.into_iter().enumerate() {
            let Some(expr) = expr.filter(|e| !e.trim().is_empty()) else {
                continue;
            };
            let criteria: FilterCriteria = serde_json::from_str(&expr).map_err(|e| {
                DbError::InvalidMetadata(format!(
                    "filter on '{}.{}' is unreadable: {}",
                    sheet, column_name, e
                ))
            })?;
            filter.set_column_criteria(position + 1, criteria);
        }
        Ok(Some(filter))
    }
}

fn cell_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}
